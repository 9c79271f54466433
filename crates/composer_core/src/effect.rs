use crate::request::GenerationRequest;
use crate::state::JobId;

/// IO the caller must perform in response to an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the request to the asynchronous job endpoint.
    SubmitAsync(GenerationRequest),
    /// Begin the fixed-interval status polling loop for `job_id`.
    StartPolling { job_id: JobId },
    /// Stop the polling loop; the flow reached a terminal phase.
    StopPolling,
    /// POST the same request to the synchronous endpoint, with a
    /// client-side abort timer.
    SubmitSync(GenerationRequest),
}
