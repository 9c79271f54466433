use serde::Deserialize;
use serde_json::{json, Value};

use composer_core::{GeneratedPost, GenerationRequest};

/// Wire body for both generation endpoints. Field names follow the
/// backend's multi-platform API.
pub(crate) fn generation_body(request: &GenerationRequest) -> Value {
    let platforms: Vec<&str> = request
        .distinct_platforms()
        .into_iter()
        .map(|platform| platform.as_str())
        .collect();
    json!({
        "profile_url": request.source_url.trim(),
        "post_theme": request.theme.trim(),
        "additional_details": request.extra_details,
        "platforms": platforms,
        "generate_image": request.want_image,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobAcceptedBody {
    pub job_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobStatusBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub result: Option<GenerateResultBody>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result payload in either historical shape: a `posts` array or a
/// singular `post`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResultBody {
    #[serde(default)]
    pub posts: Vec<PostBody>,
    #[serde(default)]
    pub post: Option<PostBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostBody {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default, alias = "generated_image_url")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PostBody {
    pub fn into_post(self) -> GeneratedPost {
        GeneratedPost {
            id: stringify_id(self.id),
            platform: self.platform.unwrap_or_else(|| "linkedin".to_string()),
            content: self.content,
            image_url: self.image_url,
            created_at: self.created_at,
        }
    }
}

impl GenerateResultBody {
    pub fn into_parts(self) -> (Vec<GeneratedPost>, Option<GeneratedPost>) {
        let posts = self.posts.into_iter().map(PostBody::into_post).collect();
        let single = self.post.map(PostBody::into_post);
        (posts, single)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuotaBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub requested_platforms: Option<u32>,
    #[serde(default)]
    pub remaining_posts: Option<u32>,
}

/// Backend ids arrive as numbers or strings depending on the route.
pub(crate) fn stringify_id(id: Option<Value>) -> String {
    match id {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}
