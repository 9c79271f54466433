use crate::{
    project, Effect, FailureKind, FlowState, Msg, Phase, PollOutcome,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Terminal phases are absorbing. Late poll responses, deadline firings and
/// sync results arriving after the flow finished are ignored, so a stale
/// callback can never mutate an already-finalized result.
pub fn update(mut state: FlowState, msg: Msg) -> (FlowState, Vec<Effect>) {
    let effects = match msg {
        Msg::Submit(request) => {
            if state.in_flight() {
                // Caller-level debounce should prevent this; drop it anyway.
                return (state, Vec::new());
            }
            if let Err(err) = request.validate() {
                state.set_phase(Phase::Failed(FailureKind::InvalidRequest(err)));
                return (state, Vec::new());
            }
            state.set_request(request.clone());
            state.set_phase(Phase::Submitting);
            vec![Effect::SubmitAsync(request)]
        }
        Msg::AsyncAccepted { job_id } => {
            if !matches!(state.phase(), Phase::Submitting) {
                return (state, Vec::new());
            }
            state.set_phase(Phase::Polling {
                job_id: job_id.clone(),
                progress: "generation started".to_string(),
            });
            vec![Effect::StartPolling { job_id }]
        }
        Msg::AsyncRejected => {
            if !matches!(state.phase(), Phase::Submitting) {
                return (state, Vec::new());
            }
            match state.request().cloned() {
                Some(request) => {
                    state.set_phase(Phase::FallingBack);
                    vec![Effect::SubmitSync(request)]
                }
                None => Vec::new(),
            }
        }
        Msg::PollUpdate(outcome) => {
            let job_id = match state.phase() {
                Phase::Polling { job_id, .. } => job_id.clone(),
                // Stale or out-of-order poll: the loop is already stopped.
                _ => return (state, Vec::new()),
            };
            match outcome {
                PollOutcome::Processing { progress } => {
                    if let Some(progress) = progress {
                        state.set_phase(Phase::Polling { job_id, progress });
                    }
                    Vec::new()
                }
                PollOutcome::Completed { posts, single } => {
                    match project(posts, single) {
                        Ok(projection) => state.set_phase(Phase::Completed(projection)),
                        Err(kind) => state.set_phase(Phase::Failed(kind)),
                    }
                    vec![Effect::StopPolling]
                }
                PollOutcome::Error { message } => {
                    state.set_phase(Phase::Failed(FailureKind::Backend(message)));
                    vec![Effect::StopPolling]
                }
                // Transient query failures are swallowed; keep polling.
                PollOutcome::QueryFailed => Vec::new(),
            }
        }
        Msg::DeadlineElapsed => {
            if !matches!(state.phase(), Phase::Polling { .. }) {
                return (state, Vec::new());
            }
            state.set_phase(Phase::TimedOut);
            vec![Effect::StopPolling]
        }
        Msg::SyncCompleted { posts, single } => {
            if !matches!(state.phase(), Phase::FallingBack) {
                return (state, Vec::new());
            }
            match project(posts, single) {
                Ok(projection) => state.set_phase(Phase::Completed(projection)),
                Err(kind) => state.set_phase(Phase::Failed(kind)),
            }
            Vec::new()
        }
        Msg::SyncFailed(kind) => {
            if !matches!(state.phase(), Phase::FallingBack) {
                return (state, Vec::new());
            }
            state.set_phase(Phase::Failed(kind));
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
