use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

use client_logging::{client_debug, client_warn};
use composer_core::{AttemptOutcome, DebugEntry, DebugLog};

use crate::transport::{ApiReply, ApiRequest, ApiTransport, Method};

/// Ordered, non-empty list of candidate URLs for one logical operation.
/// Candidates exist to tolerate backend path drift across deployments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    pub fn new(urls: Vec<String>) -> Result<Self, ResolveError> {
        if urls.is_empty() {
            return Err(ResolveError::NoCandidates);
        }
        Ok(Self(urls))
    }

    pub fn urls(&self) -> &[String] {
        &self.0
    }
}

/// Records endpoint attempts for operator troubleshooting.
pub trait DebugSink: Send + Sync {
    fn record(&self, entry: DebugEntry);
}

/// Sink discarding every entry.
#[derive(Debug, Default)]
pub struct NullDebugSink;

impl DebugSink for NullDebugSink {
    fn record(&self, _entry: DebugEntry) {}
}

/// Sink backed by the bounded core ring buffer (cap 50).
#[derive(Debug, Default)]
pub struct RingDebugSink {
    log: Mutex<DebugLog>,
}

impl RingDebugSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current entries, newest first.
    pub fn snapshot(&self) -> Vec<DebugEntry> {
        self.log
            .lock()
            .expect("debug log lock poisoned")
            .entries()
            .cloned()
            .collect()
    }
}

impl DebugSink for RingDebugSink {
    fn record(&self, entry: DebugEntry) {
        self.log.lock().expect("debug log lock poisoned").push(entry);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("candidate list is empty")]
    NoCandidates,
    #[error("all candidate endpoints failed")]
    Exhausted {
        last_status: Option<u16>,
        last_body: Value,
    },
}

impl ResolveError {
    /// Server wording from the last non-2xx candidate, if any was kept.
    pub fn last_message(&self) -> Option<String> {
        match self {
            ResolveError::Exhausted { last_body, .. } => {
                for key in ["error", "details", "message"] {
                    if let Some(text) = last_body.get(key).and_then(Value::as_str) {
                        if !text.is_empty() {
                            return Some(text.to_string());
                        }
                    }
                }
                None
            }
            ResolveError::NoCandidates => None,
        }
    }
}

/// Tries each candidate in order and returns the first 2xx body.
///
/// Network failures count as a non-match and resolution continues. A
/// non-2xx reply is retained as the last error for surfacing if every
/// candidate is exhausted. Each attempt lands in the debug sink.
pub async fn resolve(
    transport: &dyn ApiTransport,
    method: Method,
    candidates: &CandidateList,
    body: Option<Value>,
    sink: &dyn DebugSink,
) -> Result<Value, ResolveError> {
    let mut last: Option<ApiReply> = None;

    for url in candidates.urls() {
        let request = ApiRequest {
            method,
            url: url.clone(),
            body: body.clone(),
            timeout: None,
        };
        match transport.send(request).await {
            Ok(reply) if reply.is_success() => {
                client_debug!("resolved {} {} ({})", method.as_str(), url, reply.status);
                sink.record(attempt_entry(
                    format!("{} {} -> {}", method.as_str(), url, reply.status),
                    AttemptOutcome::Success,
                ));
                return Ok(reply.body);
            }
            Ok(reply) => {
                client_debug!(
                    "candidate {} {} answered {}",
                    method.as_str(),
                    url,
                    reply.status
                );
                sink.record(attempt_entry(
                    format!("{} {} -> {}", method.as_str(), url, reply.status),
                    AttemptOutcome::Failure,
                ));
                last = Some(reply);
            }
            Err(err) => {
                client_debug!("candidate {} {} unreachable: {}", method.as_str(), url, err);
                sink.record(attempt_entry(
                    format!("{} {} -> {}", method.as_str(), url, err),
                    AttemptOutcome::Failure,
                ));
            }
        }
    }

    client_warn!(
        "all {} candidates failed for {}",
        candidates.urls().len(),
        method.as_str()
    );
    Err(ResolveError::Exhausted {
        last_status: last.as_ref().map(|reply| reply.status),
        last_body: last.map(|reply| reply.body).unwrap_or(Value::Null),
    })
}

fn attempt_entry(detail: String, outcome: AttemptOutcome) -> DebugEntry {
    DebugEntry {
        at: chrono::Local::now().format("%H:%M:%S").to_string(),
        detail,
        outcome,
    }
}
