use crate::failure::ValidationError;

/// Target social platform for a generated post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Platform {
    Linkedin,
    Facebook,
    Twitter,
    Instagram,
}

impl Platform {
    /// Wire name used by the backend (lowercase).
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
        }
    }

    /// Parses a wire name. Returns `None` for anything outside the
    /// supported set.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "linkedin" => Some(Platform::Linkedin),
            "facebook" => Some(Platform::Facebook),
            "twitter" => Some(Platform::Twitter),
            "instagram" => Some(Platform::Instagram),
            _ => None,
        }
    }

    /// All supported platforms, in wire order.
    pub fn all() -> [Platform; 4] {
        [
            Platform::Linkedin,
            Platform::Facebook,
            Platform::Twitter,
            Platform::Instagram,
        ]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user request to generate posts for one or more platforms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source_url: String,
    pub theme: String,
    pub extra_details: String,
    pub platforms: Vec<Platform>,
    pub want_image: bool,
}

impl GenerationRequest {
    pub fn new(source_url: impl Into<String>, theme: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            theme: theme.into(),
            extra_details: String::new(),
            platforms: vec![Platform::Linkedin],
            want_image: false,
        }
    }

    /// Checks the request before any network call. A failed check must be
    /// surfaced immediately; no request is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.source_url.trim().is_empty() {
            return Err(ValidationError::MissingSourceUrl);
        }
        if url::Url::parse(self.source_url.trim()).is_err() {
            return Err(ValidationError::InvalidSourceUrl(self.source_url.clone()));
        }
        if self.theme.trim().is_empty() {
            return Err(ValidationError::MissingTheme);
        }
        if self.platforms.is_empty() {
            return Err(ValidationError::NoPlatforms);
        }
        Ok(())
    }

    /// Platforms with duplicates removed, preserving first occurrence.
    pub fn distinct_platforms(&self) -> Vec<Platform> {
        let mut seen = Vec::with_capacity(self.platforms.len());
        for platform in &self.platforms {
            if !seen.contains(platform) {
                seen.push(*platform);
            }
        }
        seen
    }
}
