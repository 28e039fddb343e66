//! Traits for session storage, refresh and token access
//!
//! These traits enable dependency injection and testing by abstracting
//! external dependencies (auth service, persistent storage).

use async_trait::async_trait;

use super::types::{Session, TokenError};

/// Source of bearer tokens for outgoing requests
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get an access token that is not expired at call time
    ///
    /// # Errors
    /// Fails instead of returning an empty token, so callers can tell "no
    /// auth" apart from network problems.
    async fn access_token(&self) -> Result<String, TokenError>;
}

/// Exchanges a refresh token for a new session
#[async_trait]
pub trait SessionRefresher: Send + Sync {
    /// # Errors
    /// `TokenError::SessionRevoked` when the auth service rejects the refresh
    /// token; `TokenError::RefreshFailed` for transient failures.
    async fn refresh(&self, refresh_token: &str) -> Result<Session, TokenError>;
}

/// Persistent home of the current session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session, `Ok(None)` if there is none
    async fn load(&self) -> Result<Option<Session>, TokenError>;

    async fn save(&self, session: &Session) -> Result<(), TokenError>;

    async fn clear(&self) -> Result<(), TokenError>;
}
