use std::time::Duration;

/// Environment variable selecting the backend deployment.
pub const BASE_URL_ENV: &str = "COMPOSER_API_URL";

/// Production deployment used when no override is configured.
pub const DEFAULT_BASE_URL: &str =
    "https://social-media-post-generator-backend.onrender.com";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Fixed cadence between job status queries.
    pub poll_interval: Duration,
    /// Hard ceiling from job acceptance; firing synthesizes a timeout.
    pub poll_deadline: Duration,
    /// Client-side abort timer for the synchronous fallback call.
    pub sync_timeout: Duration,
    pub connect_timeout: Duration,
    /// Per-request timeout for everything except the sync fallback.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: Duration::from_secs(2),
            poll_deadline: Duration::from_secs(600),
            sync_timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Default settings with the base URL taken from `COMPOSER_API_URL`
    /// when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(BASE_URL_ENV) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                config.base_url = trimmed.trim_end_matches('/').to_string();
            }
        }
        config
    }

    /// Joins an absolute API path onto the configured base URL.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
