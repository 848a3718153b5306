//! Process-wide quote session state.
//!
//! The OAuth authorization-code exchange happens outside this crate; whatever
//! runs it installs the resulting access token here. Everything else only
//! reads: the client attaches the token to each request, and the daily cycle
//! polls [`Session::is_ready`] before it starts.

use tokio::sync::RwLock;

/// Holds the access token for the Fyers data API.
///
/// Written once by the external authentication flow, read by all quote
/// fetches. Absence of a token means the session is not ready yet.
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    /// Creates a session with no token installed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }

    /// Creates a session that is ready immediately.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Installs (or replaces) the access token.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        tracing::info!("Quote session token installed");
    }

    /// True once an access token is available.
    pub async fn is_ready(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// The current access token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token itself.
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_unready_and_becomes_ready_after_token() {
        let session = Session::new();
        assert!(!session.is_ready().await);
        assert!(session.token().await.is_none());

        session.set_token("abc123").await;
        assert!(session.is_ready().await);
        assert_eq!(session.token().await.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn with_token_is_ready_immediately() {
        let session = Session::with_token("abc123");
        assert!(session.is_ready().await);
    }

    #[test]
    fn debug_does_not_leak_token() {
        let session = Session::with_token("super-secret");
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
