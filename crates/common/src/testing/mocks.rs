//! Mock implementations of common traits
//!
//! Provides mock token providers and session refreshers for testing purposes.

// Allow missing error/panic docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::auth::{AccessTokenProvider, Session, SessionRefresher, TokenError};

/// Token provider that always returns the same token
///
/// # Examples
///
/// ```
/// # tokio_test::block_on(async {
/// use partnerhub_common::auth::AccessTokenProvider;
/// use partnerhub_common::testing::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("test-token");
/// assert_eq!(provider.access_token().await.unwrap(), "test-token");
/// assert_eq!(provider.calls(), 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
    calls: Arc<AtomicUsize>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), calls: Arc::new(AtomicUsize::new(0)) }
    }

    /// Number of times a token was requested
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.token.clone())
    }
}

/// Token provider that always fails
#[derive(Debug, Clone)]
pub struct FailingTokenProvider {
    error: TokenError,
}

impl FailingTokenProvider {
    pub fn new(error: TokenError) -> Self {
        Self { error }
    }

    pub fn not_authenticated() -> Self {
        Self::new(TokenError::NotAuthenticated)
    }
}

#[async_trait]
impl AccessTokenProvider for FailingTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        Err(self.error.clone())
    }
}

/// Token provider that hands out tokens from a list, repeating the last one
///
/// Simulates rotation between attempts.
#[derive(Debug, Clone)]
pub struct RotatingTokenProvider {
    tokens: Arc<Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl RotatingTokenProvider {
    pub fn new(tokens: &[&str]) -> Self {
        Self {
            tokens: Arc::new(tokens.iter().map(|t| (*t).to_string()).collect()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for RotatingTokenProvider {
    async fn access_token(&self) -> Result<String, TokenError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .cloned()
            .ok_or(TokenError::NotAuthenticated)
    }
}

#[derive(Debug, Clone)]
enum RefreshScript {
    Succeed(String),
    Revoke,
    Fail(String),
}

/// Session refresher with a fixed outcome, a call counter and optional delay
#[derive(Debug, Clone)]
pub struct ScriptedRefresher {
    script: RefreshScript,
    delay: Arc<Mutex<Option<Duration>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedRefresher {
    /// Every refresh returns a one-hour session with `access_token`
    pub fn succeeding(access_token: impl Into<String>) -> Self {
        Self::with_script(RefreshScript::Succeed(access_token.into()))
    }

    /// Every refresh is rejected as revoked
    pub fn revoking() -> Self {
        Self::with_script(RefreshScript::Revoke)
    }

    /// Every refresh fails transiently
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_script(RefreshScript::Fail(reason.into()))
    }

    fn with_script(script: RefreshScript) -> Self {
        Self { script, delay: Arc::new(Mutex::new(None)), calls: Arc::new(AtomicUsize::new(0)) }
    }

    /// Sleep before answering, to widen race windows in tests
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.delay.lock() = Some(delay);
        self
    }

    /// Shared counter of refresh calls
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl SessionRefresher for ScriptedRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<Session, TokenError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match &self.script {
            RefreshScript::Succeed(token) => {
                Ok(Session::new(token.clone(), Some(format!("{refresh_token}-next")), 3600))
            }
            RefreshScript::Revoke => Err(TokenError::SessionRevoked("invalid_grant".into())),
            RefreshScript::Fail(reason) => Err(TokenError::RefreshFailed(reason.clone())),
        }
    }
}
