use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use client_logging::{client_info, client_warn};

use crate::config::ClientConfig;
use crate::resolve::{resolve, CandidateList, DebugSink, ResolveError};
use crate::transport::{ApiTransport, Method};

use crate::dto::stringify_id;

/// One user row as served by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(default, deserialize_with = "id_field")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostRecord {
    #[serde(default, deserialize_with = "id_field")]
    pub id: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Counts shared by the stats sub-objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CountBlock {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub admins: u64,
    #[serde(default)]
    pub posted: u64,
    #[serde(default)]
    pub draft: u64,
}

/// Dashboard stats. Substituted with zeros when every endpoint fails, so
/// the dashboard renders instead of breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub users: CountBlock,
    #[serde(default)]
    pub posts: CountBlock,
    #[serde(default)]
    pub social_accounts: CountBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Admin CRUD over the drifting endpoint families. Reads substitute benign
/// defaults on total failure; mutations surface the server's wording.
pub struct AdminClient<'a, T: ApiTransport> {
    transport: &'a T,
    config: ClientConfig,
    sink: &'a dyn DebugSink,
}

impl<'a, T: ApiTransport> AdminClient<'a, T> {
    pub fn new(transport: &'a T, config: ClientConfig, sink: &'a dyn DebugSink) -> Self {
        Self {
            transport,
            config,
            sink,
        }
    }

    fn user_candidates(&self, suffix: &str) -> CandidateList {
        self.candidates(&[
            format!("api/admin/users{suffix}"),
            format!("api/debug-admin/debug-users{suffix}"),
            format!("api/debug-admin-safe/debug-users{suffix}"),
        ])
    }

    fn candidates(&self, paths: &[String]) -> CandidateList {
        let urls = paths
            .iter()
            .map(|path| self.config.endpoint(path))
            .collect();
        CandidateList::new(urls).expect("candidate paths are hardcoded non-empty")
    }

    /// Fetches all users; an unreachable backend yields an empty list
    /// rather than an error.
    pub async fn fetch_users(&self) -> Vec<UserRecord> {
        let candidates = self.user_candidates("");
        match resolve(self.transport, Method::Get, &candidates, None, self.sink).await {
            Ok(body) => parse_list(body, "users"),
            Err(err) => {
                client_warn!("user fetch exhausted every candidate: {err}");
                Vec::new()
            }
        }
    }

    /// Fetches all posts; defaults to an empty list on total failure.
    pub async fn fetch_posts(&self) -> Vec<PostRecord> {
        let candidates = self.candidates(&[
            "api/debug-admin/debug-posts".to_string(),
            "api/debug-admin-safe/debug-posts".to_string(),
        ]);
        match resolve(self.transport, Method::Get, &candidates, None, self.sink).await {
            Ok(body) => parse_list(body, "posts"),
            Err(err) => {
                client_warn!("post fetch exhausted every candidate: {err}");
                Vec::new()
            }
        }
    }

    /// Fetches dashboard stats; defaults to zeroed counters on total
    /// failure.
    pub async fn fetch_stats(&self) -> AdminStats {
        let candidates = self.candidates(&[
            "api/debug-admin/debug-stats".to_string(),
            "api/debug-admin-safe/debug-stats".to_string(),
        ]);
        match resolve(self.transport, Method::Get, &candidates, None, self.sink).await {
            Ok(body) => serde_json::from_value(body).unwrap_or_default(),
            Err(err) => {
                client_warn!("stats fetch exhausted every candidate: {err}");
                AdminStats::default()
            }
        }
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<UserRecord, AdminError> {
        let body = json!({
            "username": username,
            "email": email,
            "password": password,
            "role": role,
        });
        let candidates = self.user_candidates("");
        let reply = self
            .mutate(Method::Post, &candidates, Some(body))
            .await?;
        client_info!("created user {username}");
        Ok(reply
            .get("user")
            .cloned()
            .and_then(|user| serde_json::from_value(user).ok())
            .unwrap_or(UserRecord {
                id: String::new(),
                username: username.to_string(),
                email: email.to_string(),
                role: role.to_string(),
                subscription: None,
                is_active: true,
            }))
    }

    pub async fn update_user(&self, id: &str, changes: Value) -> Result<(), AdminError> {
        let candidates = self.user_candidates(&format!("/{id}"));
        self.mutate(Method::Put, &candidates, Some(changes)).await?;
        client_info!("updated user {id}");
        Ok(())
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), AdminError> {
        let candidates = self.user_candidates(&format!("/{id}"));
        self.mutate(Method::Delete, &candidates, None).await?;
        client_info!("deleted user {id}");
        Ok(())
    }

    async fn mutate(
        &self,
        method: Method,
        candidates: &CandidateList,
        body: Option<Value>,
    ) -> Result<Value, AdminError> {
        match resolve(self.transport, method, candidates, body, self.sink).await {
            Ok(reply) => Ok(reply),
            Err(err) => match err.last_message() {
                Some(message) => Err(AdminError::Rejected(message)),
                None => Err(AdminError::Resolve(err)),
            },
        }
    }
}

fn parse_list<R: for<'de> Deserialize<'de>>(body: Value, key: &str) -> Vec<R> {
    body.get(key)
        .cloned()
        .and_then(|items| serde_json::from_value(items).ok())
        .unwrap_or_default()
}

fn default_true() -> bool {
    true
}

fn id_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(stringify_id(value))
}
