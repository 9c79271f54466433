use crate::failure::FailureKind;

/// One generated post as returned by the backend. Immutable once received;
/// local edits go through an update request, never a new entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPost {
    pub id: String,
    pub platform: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: Option<String>,
}

/// Uniform in-memory shape regardless of which backend response variant
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    pub posts: Vec<GeneratedPost>,
    pub platforms_generated: Vec<String>,
}

/// Normalizes the two historical response shapes into one.
///
/// A non-empty `posts` array wins and `platforms_generated` is derived from
/// its members; otherwise a singular `post` wraps to a one-element list.
/// Neither present is a generation failure even when the HTTP status said
/// success: an empty result must never render silently.
pub fn project(
    posts: Vec<GeneratedPost>,
    single: Option<GeneratedPost>,
) -> Result<Projection, FailureKind> {
    let posts = if !posts.is_empty() {
        posts
    } else if let Some(post) = single {
        vec![post]
    } else {
        return Err(FailureKind::EmptyResult);
    };

    let mut platforms_generated = Vec::with_capacity(posts.len());
    for post in &posts {
        if !platforms_generated.contains(&post.platform) {
            platforms_generated.push(post.platform.clone());
        }
    }

    Ok(Projection {
        posts,
        platforms_generated,
    })
}
