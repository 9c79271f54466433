use std::fmt;

/// A request problem caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingSourceUrl,
    InvalidSourceUrl(String),
    MissingTheme,
    NoPlatforms,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingSourceUrl => write!(f, "source URL is required"),
            ValidationError::InvalidSourceUrl(url) => write!(f, "source URL is not valid: {url}"),
            ValidationError::MissingTheme => write!(f, "post theme is required"),
            ValidationError::NoPlatforms => write!(f, "select at least one platform"),
        }
    }
}

/// Why a generation flow ended without posts.
///
/// The display wording is user-facing. A client-side timeout must read as
/// "try again", never as a backend rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidRequest(ValidationError),
    QuotaExceeded {
        message: String,
        requested_platforms: Option<u32>,
        remaining_posts: Option<u32>,
    },
    Backend(String),
    Timeout,
    Network,
    EmptyResult,
}

impl FailureKind {
    /// Whether retrying the same request may plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureKind::Timeout | FailureKind::Network)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidRequest(err) => write!(f, "{err}"),
            FailureKind::QuotaExceeded {
                message,
                requested_platforms,
                remaining_posts,
            } => {
                write!(f, "{message}")?;
                if let (Some(requested), Some(remaining)) = (requested_platforms, remaining_posts) {
                    write!(f, " ({requested} posts requested, {remaining} remaining)")?;
                }
                Ok(())
            }
            FailureKind::Backend(message) => write!(f, "generation failed: {message}"),
            FailureKind::Timeout => {
                write!(f, "generation is taking too long; please try again")
            }
            FailureKind::Network => write!(f, "connection error"),
            FailureKind::EmptyResult => write!(f, "the backend returned no posts"),
        }
    }
}
