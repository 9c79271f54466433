use std::sync::{Arc, RwLock};

/// Shared read accessor for the bearer token.
///
/// All network call sites read through one context instead of touching
/// storage ad hoc. Only login/logout mutate it, and those are serialized
/// by user action, so reads never race a write mid-flow.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthContext {
    /// Context with no token; requests go out unauthenticated.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let context = Self::default();
        context.set_token(token);
        context
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().expect("auth lock poisoned").clone()
    }

    /// Login path: installs a new bearer token.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("auth lock poisoned") = Some(token.into());
    }

    /// Logout path: drops the token.
    pub fn clear(&self) {
        *self.token.write().expect("auth lock poisoned") = None;
    }
}
