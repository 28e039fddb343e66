//! Session token types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authenticated session issued by the backend's auth service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// JWT access token sent as `Authorization: Bearer`
    pub access_token: String,

    /// Refresh token; absent for sessions that cannot be renewed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Absolute expiration timestamp (UTC)
    pub expires_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Session {
    /// Create a session that expires `expires_in` seconds from now
    #[must_use]
    pub fn new(access_token: String, refresh_token: Option<String>, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
            user_id: None,
        }
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// `true` if the access token is expired or will expire within
    /// `threshold_seconds`
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        Utc::now() + chrono::Duration::seconds(threshold_seconds) >= self.expires_at
    }

    #[must_use]
    pub fn seconds_until_expiry(&self) -> i64 {
        (self.expires_at - Utc::now()).num_seconds()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Error type for token operations
///
/// `Clone` so a single refresh outcome can be shared by every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No session loaded (never signed in, or signed out)
    #[error("Not authenticated (no session)")]
    NotAuthenticated,

    /// Session has no refresh token and its access token expired
    #[error("No refresh token available")]
    NoRefreshToken,

    /// Auth service rejected the refresh token; the session was cleared
    #[error("Session revoked: {0}")]
    SessionRevoked(String),

    /// Refresh failed for a reason that may go away (network, 5xx)
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Session store operation failed
    #[error("Session store error: {0}")]
    Store(String),
}
