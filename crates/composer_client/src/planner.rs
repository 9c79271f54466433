use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::transport::{ApiRequest, ApiTransport, TransportError};

/// How the planner seeds its ideas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdeaMode {
    /// Derive ideas from up to three source URLs.
    Urls(Vec<String>),
    /// Expand a free-form idea text.
    Idea(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaRequest {
    pub mode: IdeaMode,
    pub limit: u32,
    pub persona: Option<String>,
    /// Channel shorthands the backend knows: LI, FB, IG, X.
    pub channels: Vec<String>,
}

impl IdeaRequest {
    pub fn from_urls(urls: Vec<String>) -> Self {
        Self {
            mode: IdeaMode::Urls(urls),
            limit: 10,
            persona: None,
            channels: Vec::new(),
        }
    }

    pub fn from_idea(idea: impl Into<String>) -> Self {
        Self {
            mode: IdeaMode::Idea(idea.into()),
            limit: 10,
            persona: None,
            channels: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerIdea {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub funnel: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IdeasBody {
    #[serde(default)]
    ideas: Vec<PlannerIdea>,
    #[serde(default)]
    warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("at most 3 source URLs are allowed")]
    TooManyUrls,
    #[error("idea text must not be empty")]
    EmptyIdea,
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Client for the content-planner idea endpoints.
pub struct PlannerClient<'a, T: ApiTransport> {
    transport: &'a T,
    config: ClientConfig,
}

impl<'a, T: ApiTransport> PlannerClient<'a, T> {
    pub fn new(transport: &'a T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Generates content ideas. Returns ideas plus any backend warnings.
    pub async fn generate_ideas(
        &self,
        request: &IdeaRequest,
    ) -> Result<(Vec<PlannerIdea>, Vec<String>), PlannerError> {
        let mut body = json!({ "limit": request.limit });
        match &request.mode {
            IdeaMode::Urls(urls) => {
                if urls.len() > 3 {
                    return Err(PlannerError::TooManyUrls);
                }
                body["mode"] = json!("url");
                body["urls"] = json!(urls);
            }
            IdeaMode::Idea(idea) => {
                if idea.trim().is_empty() {
                    return Err(PlannerError::EmptyIdea);
                }
                body["mode"] = json!("idea");
                body["idea"] = json!(idea);
            }
        }
        if let Some(persona) = &request.persona {
            body["persona"] = json!(persona);
        }
        if !request.channels.is_empty() {
            body["channels"] = json!(request.channels);
        }

        let url = self.config.endpoint("api/planner/ideas");
        let reply = self.transport.send(ApiRequest::post(url, body)).await?;
        if !reply.is_success() {
            let message = reply
                .server_message()
                .unwrap_or_else(|| format!("http status {}", reply.status));
            return Err(PlannerError::Rejected(message));
        }

        let parsed: IdeasBody = serde_json::from_value(reply.body).unwrap_or_default();
        Ok((parsed.ideas, parsed.warnings))
    }

    /// Health probe used before offering the planner UI.
    pub async fn health(&self) -> bool {
        let url = self.config.endpoint("api/planner/health");
        matches!(
            self.transport.send(ApiRequest::get(url)).await,
            Ok(reply) if reply.is_success()
        )
    }
}
