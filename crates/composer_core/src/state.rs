use crate::failure::FailureKind;
use crate::project::Projection;
use crate::request::GenerationRequest;
use crate::view_model::FlowView;

/// Opaque server-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a generation flow currently stands.
///
/// `Completed`, `Failed` and `TimedOut` are terminal: no message may move
/// the flow out of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Polling { job_id: JobId, progress: String },
    FallingBack,
    Completed(Projection),
    Failed(FailureKind),
    TimedOut,
}

/// State of one generation flow, driven purely by [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowState {
    phase: Phase,
    request: Option<GenerationRequest>,
}

impl FlowState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            request: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The request currently being processed, if any.
    pub fn request(&self) -> Option<&GenerationRequest> {
        self.request.as_ref()
    }

    /// True once the flow reached `Completed`, `Failed` or `TimedOut`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            Phase::Completed(_) | Phase::Failed(_) | Phase::TimedOut
        )
    }

    /// True while a submission or poll loop is outstanding. The caller uses
    /// this to disable the trigger control; the state machine also ignores
    /// a second `Submit` while it holds.
    pub fn in_flight(&self) -> bool {
        matches!(
            self.phase,
            Phase::Submitting | Phase::Polling { .. } | Phase::FallingBack
        )
    }

    pub fn view(&self) -> FlowView {
        let (progress, posts, error) = match &self.phase {
            Phase::Idle | Phase::Submitting => (None, Vec::new(), None),
            Phase::Polling { progress, .. } => (Some(progress.clone()), Vec::new(), None),
            Phase::FallingBack => (
                Some("falling back to direct generation".to_string()),
                Vec::new(),
                None,
            ),
            Phase::Completed(projection) => (None, projection.posts.clone(), None),
            Phase::Failed(kind) => (None, Vec::new(), Some(kind.to_string())),
            Phase::TimedOut => (None, Vec::new(), Some(FailureKind::Timeout.to_string())),
        };
        FlowView {
            phase_label: phase_label(&self.phase),
            progress,
            posts,
            error,
            trigger_enabled: !self.in_flight(),
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_request(&mut self, request: GenerationRequest) {
        self.request = Some(request);
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

fn phase_label(phase: &Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Submitting => "submitting",
        Phase::Polling { .. } => "generating",
        Phase::FallingBack => "falling back",
        Phase::Completed(_) => "completed",
        Phase::Failed(_) => "failed",
        Phase::TimedOut => "timed out",
    }
}
