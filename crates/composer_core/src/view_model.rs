use crate::project::GeneratedPost;

/// What a UI needs to render one generation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowView {
    pub phase_label: &'static str,
    pub progress: Option<String>,
    pub posts: Vec<GeneratedPost>,
    pub error: Option<String>,
    /// False while a job is in flight; used to disable the trigger control.
    pub trigger_enabled: bool,
}
