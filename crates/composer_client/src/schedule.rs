use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use client_logging::client_info;

use crate::config::ClientConfig;
use crate::transport::{ApiRequest, ApiTransport, TransportError};

/// Lifecycle of a scheduled post. Transitions past `Scheduled` happen on
/// the backend; the client only observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Published,
    Failed,
    Cancelled,
}

impl ScheduleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleStatus::Scheduled => "scheduled",
            ScheduleStatus::Published => "published",
            ScheduleStatus::Failed => "failed",
            ScheduleStatus::Cancelled => "cancelled",
        }
    }
}

/// Request to publish content at a future local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub platform: String,
    /// `YYYY-MM-DD` in the given timezone.
    pub scheduled_date: String,
    /// `HH:MM` in the given timezone.
    pub scheduled_time: String,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScheduledPost {
    pub id: i64,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub generated_image_url: Option<String>,
    pub platform: String,
    pub scheduled_time: String,
    #[serde(default)]
    pub timezone: Option<String>,
    pub status: ScheduleStatus,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// Server refused the operation; carries its wording for the alert.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("unreadable scheduler response")]
    BadResponse,
}

/// Client for the scheduling endpoints. Scheduling is entirely backend
/// driven; these calls only create, list and amend entries.
pub struct SchedulerClient<'a, T: ApiTransport> {
    transport: &'a T,
    config: ClientConfig,
}

impl<'a, T: ApiTransport> SchedulerClient<'a, T> {
    pub fn new(transport: &'a T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub async fn schedule(&self, request: &ScheduleRequest) -> Result<ScheduledPost, SchedulerError> {
        let url = self.config.endpoint("api/scheduler/schedule");
        let body = serde_json::to_value(request).map_err(|_| SchedulerError::BadResponse)?;
        let reply = self.send_checked(ApiRequest::post(url, body)).await?;
        client_info!("scheduled a {} post", request.platform);
        extract_scheduled_post(reply)
    }

    /// Schedules an already-generated post from the library.
    pub async fn schedule_existing(
        &self,
        post_id: i64,
        request: &ScheduleRequest,
    ) -> Result<ScheduledPost, SchedulerError> {
        let url = self.config.endpoint("api/scheduler/schedule-existing");
        let mut body = serde_json::to_value(request).map_err(|_| SchedulerError::BadResponse)?;
        if let Value::Object(map) = &mut body {
            map.insert("post_id".to_string(), json!(post_id));
        }
        let reply = self.send_checked(ApiRequest::post(url, body)).await?;
        extract_scheduled_post(reply)
    }

    /// Lists scheduled posts, optionally filtered by status.
    pub async fn list(
        &self,
        status: Option<ScheduleStatus>,
    ) -> Result<Vec<ScheduledPost>, SchedulerError> {
        let mut url = self.config.endpoint("api/scheduler/scheduled");
        if let Some(status) = status {
            url.push_str("?status=");
            url.push_str(status.as_str());
        }
        let reply = self.send_checked(ApiRequest::get(url)).await?;
        reply
            .get("scheduled_posts")
            .cloned()
            .and_then(|posts| serde_json::from_value(posts).ok())
            .ok_or(SchedulerError::BadResponse)
    }

    pub async fn cancel(&self, id: i64) -> Result<(), SchedulerError> {
        let url = self.config.endpoint(&format!("api/scheduler/scheduled/{id}"));
        self.send_checked(ApiRequest::delete(url)).await?;
        client_info!("cancelled scheduled post {id}");
        Ok(())
    }

    pub async fn reschedule(
        &self,
        id: i64,
        scheduled_date: &str,
        scheduled_time: &str,
        timezone: &str,
    ) -> Result<(), SchedulerError> {
        let url = self
            .config
            .endpoint(&format!("api/scheduler/scheduled/{id}/reschedule"));
        let body = json!({
            "scheduled_date": scheduled_date,
            "scheduled_time": scheduled_time,
            "timezone": timezone,
        });
        self.send_checked(ApiRequest::put(url, body)).await?;
        client_info!("rescheduled post {id}");
        Ok(())
    }

    async fn send_checked(&self, request: ApiRequest) -> Result<Value, SchedulerError> {
        let reply = self.transport.send(request).await?;
        if reply.is_success() {
            return Ok(reply.body);
        }
        let message = reply
            .server_message()
            .unwrap_or_else(|| format!("http status {}", reply.status));
        Err(SchedulerError::Rejected(message))
    }
}

fn extract_scheduled_post(reply: Value) -> Result<ScheduledPost, SchedulerError> {
    reply
        .get("scheduled_post")
        .cloned()
        .and_then(|post| serde_json::from_value(post).ok())
        .ok_or(SchedulerError::BadResponse)
}
