use std::collections::VecDeque;

use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};

use client_logging::{client_debug, client_info, client_warn};
use composer_core::{
    update, Effect, FailureKind, FlowState, GenerationRequest, JobId, Msg, Phase, PollOutcome,
    Projection,
};

use crate::config::ClientConfig;
use crate::dto::{generation_body, GenerateResultBody, JobAcceptedBody, JobStatusBody, QuotaBody};
use crate::transport::{ApiRequest, ApiTransport, TransportError};

/// Observable milestones of one generation flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    Submitted,
    JobAccepted { job_id: JobId },
    Progress(String),
    FellBack,
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: FlowEvent);
}

/// Sink discarding every event.
#[derive(Debug, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: FlowEvent) {}
}

/// Drives a whole generation through the pure flow state machine:
/// async submission, status polling with a hard deadline, and the
/// synchronous fallback path.
pub struct Generator<T: ApiTransport> {
    transport: T,
    config: ClientConfig,
}

impl<T: ApiTransport> Generator<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Runs the flow to a terminal phase and reports the projection or the
    /// failure. Exactly one poll loop runs per accepted job; the caller is
    /// expected to debounce concurrent submissions.
    pub async fn generate(
        &self,
        request: GenerationRequest,
        sink: &dyn ProgressSink,
    ) -> Result<Projection, FailureKind> {
        let mut state = FlowState::new();
        let mut pending: VecDeque<Effect> = VecDeque::new();

        let (next, effects) = update(state, Msg::Submit(request));
        state = next;
        pending.extend(effects);

        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::SubmitAsync(request) => {
                    sink.emit(FlowEvent::Submitted);
                    let msg = self.submit_async(&request).await;
                    if let Msg::AsyncAccepted { job_id } = &msg {
                        sink.emit(FlowEvent::JobAccepted {
                            job_id: job_id.clone(),
                        });
                    } else {
                        sink.emit(FlowEvent::FellBack);
                    }
                    let (next, effects) = update(state, msg);
                    state = next;
                    pending.extend(effects);
                }
                Effect::StartPolling { job_id } => {
                    let (next, effects) = self.poll_until_terminal(state, &job_id, sink).await;
                    state = next;
                    pending.extend(effects);
                }
                Effect::SubmitSync(request) => {
                    let msg = self.submit_sync(&request).await;
                    let (next, effects) = update(state, msg);
                    state = next;
                    pending.extend(effects);
                }
                // The poll loop already exited when this was emitted.
                Effect::StopPolling => {}
            }
        }

        match state.phase() {
            Phase::Completed(projection) => Ok(projection.clone()),
            Phase::Failed(kind) => Err(kind.clone()),
            Phase::TimedOut => Err(FailureKind::Timeout),
            other => {
                client_warn!("generation flow ended in non-terminal phase {other:?}");
                Err(FailureKind::Network)
            }
        }
    }

    async fn submit_async(&self, request: &GenerationRequest) -> Msg {
        let url = self.config.endpoint("api/async/generate-async");
        let api_request = ApiRequest::post(url, generation_body(request));

        match self.transport.send(api_request).await {
            Ok(reply) if reply.is_success() => {
                match serde_json::from_value::<JobAcceptedBody>(reply.body.clone()) {
                    Ok(accepted) => {
                        client_info!("async generation accepted, job {}", accepted.job_id);
                        Msg::AsyncAccepted {
                            job_id: JobId(accepted.job_id),
                        }
                    }
                    Err(err) => {
                        client_warn!("async accept body unreadable ({err}), falling back");
                        Msg::AsyncRejected
                    }
                }
            }
            Ok(reply) => {
                client_warn!("async endpoint answered {}, falling back", reply.status);
                Msg::AsyncRejected
            }
            Err(err) => {
                client_warn!("async endpoint unreachable ({err}), falling back");
                Msg::AsyncRejected
            }
        }
    }

    /// Queries job status at the configured cadence until the flow goes
    /// terminal or the deadline fires. The deadline branch is biased so a
    /// due tick can never beat an elapsed ceiling, and no query is issued
    /// after either exit.
    async fn poll_until_terminal(
        &self,
        mut state: FlowState,
        job_id: &JobId,
        sink: &dyn ProgressSink,
    ) -> (FlowState, Vec<Effect>) {
        let status_url = self
            .config
            .endpoint(&format!("api/async/status/{job_id}"));
        let deadline = Instant::now() + self.config.poll_deadline;
        let mut ticker = interval_at(
            Instant::now() + self.config.poll_interval,
            self.config.poll_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut emitted = Vec::new();

        loop {
            tokio::select! {
                biased;
                _ = sleep_until(deadline) => {
                    client_warn!("job {job_id} exceeded the polling deadline");
                    let (next, effects) = update(state, Msg::DeadlineElapsed);
                    state = next;
                    emitted.extend(effects);
                    break;
                }
                _ = ticker.tick() => {
                    let outcome = self.query_status(&status_url).await;
                    if let PollOutcome::Processing { progress: Some(progress) } = &outcome {
                        sink.emit(FlowEvent::Progress(progress.clone()));
                    }
                    let (next, effects) = update(state, Msg::PollUpdate(outcome));
                    state = next;
                    emitted.extend(effects);
                    if state.is_terminal() {
                        break;
                    }
                }
            }
        }

        (state, emitted)
    }

    async fn query_status(&self, status_url: &str) -> PollOutcome {
        let reply = match self.transport.send(ApiRequest::get(status_url)).await {
            Ok(reply) if reply.is_success() => reply,
            Ok(reply) => {
                client_debug!("status query answered {}; polling continues", reply.status);
                return PollOutcome::QueryFailed;
            }
            Err(err) => {
                client_debug!("status query failed ({err}); polling continues");
                return PollOutcome::QueryFailed;
            }
        };

        let body: JobStatusBody = match serde_json::from_value(reply.body) {
            Ok(body) => body,
            Err(err) => {
                client_debug!("status body unreadable ({err}); polling continues");
                return PollOutcome::QueryFailed;
            }
        };

        match body.status.as_deref() {
            Some("completed") => {
                let (posts, single) = body.result.unwrap_or_default().into_parts();
                PollOutcome::Completed { posts, single }
            }
            Some("error") => PollOutcome::Error {
                message: body
                    .error
                    .unwrap_or_else(|| "unknown generation error".to_string()),
            },
            _ => PollOutcome::Processing {
                progress: body.progress.or(body.status),
            },
        }
    }

    /// Single blocking call with a client-side abort timer; no retry. A
    /// timeout here must surface differently from a backend rejection.
    async fn submit_sync(&self, request: &GenerationRequest) -> Msg {
        let url = self.config.endpoint("api/posts/generate");
        let api_request =
            ApiRequest::post(url, generation_body(request)).with_timeout(self.config.sync_timeout);

        let reply = match self.transport.send(api_request).await {
            Ok(reply) => reply,
            Err(TransportError::Timeout) => {
                client_warn!("sync generation aborted by the client-side timer");
                return Msg::SyncFailed(FailureKind::Timeout);
            }
            Err(err) => {
                client_warn!("sync generation unreachable: {err}");
                return Msg::SyncFailed(FailureKind::Network);
            }
        };

        if reply.is_success() {
            let body: GenerateResultBody =
                serde_json::from_value(reply.body).unwrap_or_default();
            let (posts, single) = body.into_parts();
            return Msg::SyncCompleted { posts, single };
        }

        if reply.status == 429 {
            let quota: QuotaBody = serde_json::from_value(reply.body).unwrap_or_default();
            return Msg::SyncFailed(FailureKind::QuotaExceeded {
                message: quota
                    .error
                    .unwrap_or_else(|| "Monthly post limit reached".to_string()),
                requested_platforms: quota.requested_platforms,
                remaining_posts: quota.remaining_posts,
            });
        }

        let message = reply
            .server_message()
            .unwrap_or_else(|| format!("http status {}", reply.status));
        Msg::SyncFailed(FailureKind::Backend(message))
    }
}
