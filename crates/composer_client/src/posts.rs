use serde_json::json;
use thiserror::Error;

use client_logging::client_info;
use composer_core::GeneratedPost;

use crate::config::ClientConfig;
use crate::dto::PostBody;
use crate::transport::{ApiRequest, ApiTransport, TransportError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostsError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Client for the saved-post library: listing, local-edit updates,
/// deletion and publishing.
pub struct PostsClient<'a, T: ApiTransport> {
    transport: &'a T,
    config: ClientConfig,
}

impl<'a, T: ApiTransport> PostsClient<'a, T> {
    pub fn new(transport: &'a T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub async fn list(&self) -> Result<Vec<GeneratedPost>, PostsError> {
        let url = self.config.endpoint("api/posts");
        let reply = self.transport.send(ApiRequest::get(url)).await?;
        if !reply.is_success() {
            return Err(rejected(&reply));
        }
        let posts: Vec<PostBody> = reply
            .body
            .get("posts")
            .cloned()
            .and_then(|posts| serde_json::from_value(posts).ok())
            .unwrap_or_default();
        Ok(posts.into_iter().map(PostBody::into_post).collect())
    }

    /// A local edit produces an update request against the existing
    /// entity, never a new post.
    pub async fn update_content(&self, id: &str, content: &str) -> Result<(), PostsError> {
        let url = self.config.endpoint(&format!("api/posts/{id}"));
        let body = json!({ "content": content });
        let reply = self.transport.send(ApiRequest::put(url, body)).await?;
        if !reply.is_success() {
            return Err(rejected(&reply));
        }
        client_info!("updated post {id}");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), PostsError> {
        let url = self.config.endpoint(&format!("api/posts/{id}"));
        let reply = self.transport.send(ApiRequest::delete(url)).await?;
        if !reply.is_success() {
            return Err(rejected(&reply));
        }
        client_info!("deleted post {id}");
        Ok(())
    }

    /// Asks the backend to publish a saved post to the given platforms.
    pub async fn publish(&self, post_id: &str, platforms: &[&str]) -> Result<(), PostsError> {
        let url = self.config.endpoint("api/social-accounts/publish");
        let body = json!({ "post_id": post_id, "platforms": platforms });
        let reply = self.transport.send(ApiRequest::post(url, body)).await?;
        if !reply.is_success() {
            return Err(rejected(&reply));
        }
        client_info!("published post {post_id} to {} platforms", platforms.len());
        Ok(())
    }
}

fn rejected(reply: &crate::transport::ApiReply) -> PostsError {
    PostsError::Rejected(
        reply
            .server_message()
            .unwrap_or_else(|| format!("http status {}", reply.status)),
    )
}
