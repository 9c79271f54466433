use crate::failure::FailureKind;
use crate::project::GeneratedPost;
use crate::request::GenerationRequest;
use crate::state::JobId;

/// One observed poll response, already decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Job still running; the backend may attach a progress message.
    Processing { progress: Option<String> },
    /// Terminal success. Carries both historical result shapes; the update
    /// function applies the projection rule.
    Completed {
        posts: Vec<GeneratedPost>,
        single: Option<GeneratedPost>,
    },
    /// Terminal backend-reported failure.
    Error { message: String },
    /// The status query itself failed (network, parse). Swallowed; polling
    /// continues.
    QueryFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User triggered a generation.
    Submit(GenerationRequest),
    /// Async endpoint accepted the job.
    AsyncAccepted { job_id: JobId },
    /// Async endpoint unreachable or rejected; fall back to the sync path.
    AsyncRejected,
    /// A poll response (or poll failure) arrived for the in-flight job.
    PollUpdate(PollOutcome),
    /// The client-side ceiling elapsed before a terminal server status.
    DeadlineElapsed,
    /// Sync fallback returned posts.
    SyncCompleted {
        posts: Vec<GeneratedPost>,
        single: Option<GeneratedPost>,
    },
    /// Sync fallback failed.
    SyncFailed(FailureKind),
    /// Fallback for placeholder wiring.
    NoOp,
}
