//! Token manager with single-flight refresh
//!
//! Manages the session lifecycle:
//! - Session retrieval from the session store
//! - Refresh before expiry (configurable threshold)
//! - One refresh operation shared by every concurrent caller
//! - Session clearing when the auth service revokes the refresh token

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::traits::{AccessTokenProvider, SessionRefresher, SessionStore};
use super::types::{Session, TokenError};

type SharedRefresh = Shared<BoxFuture<'static, Result<Session, TokenError>>>;

/// Token manager
///
/// Thread-safe; share it behind an `Arc`. Concurrent callers that find the
/// token expired all await the same pending refresh rather than each
/// starting their own.
pub struct TokenManager<R: SessionRefresher + 'static, S: SessionStore + 'static> {
    refresher: Arc<R>,
    store: Arc<S>,
    current: Arc<RwLock<Option<Session>>>,
    pending_refresh: Mutex<Option<(u64, SharedRefresh)>>,
    refresh_generation: AtomicU64,
    refresh_threshold_seconds: i64,
}

impl<R: SessionRefresher + 'static, S: SessionStore + 'static> TokenManager<R, S> {
    /// Create a new token manager
    ///
    /// # Arguments
    /// * `refresher` - Auth service client used to renew sessions
    /// * `store` - Persistent session storage
    /// * `refresh_threshold_seconds` - Refresh this many seconds before expiry
    #[must_use]
    pub fn new(refresher: R, store: Arc<S>, refresh_threshold_seconds: i64) -> Self {
        Self {
            refresher: Arc::new(refresher),
            store,
            current: Arc::new(RwLock::new(None)),
            pending_refresh: Mutex::new(None),
            refresh_generation: AtomicU64::new(0),
            refresh_threshold_seconds,
        }
    }

    /// Load the stored session into memory
    ///
    /// # Returns
    /// `true` if a session was found
    ///
    /// # Errors
    /// Returns error if the store cannot be read (not if it is empty)
    pub async fn initialize(&self) -> Result<bool, TokenError> {
        match self.store.load().await? {
            Some(session) => {
                *self.current.write().await = Some(session);
                info!("Token manager initialized with stored session");
                Ok(true)
            }
            None => {
                debug!("No stored session found");
                Ok(false)
            }
        }
    }

    /// Store a new session (after sign-in)
    ///
    /// # Errors
    /// Returns error if the store rejects the session
    pub async fn store_session(&self, session: Session) -> Result<(), TokenError> {
        self.store.save(&session).await?;
        *self.current.write().await = Some(session);
        info!("Session stored");
        Ok(())
    }

    /// Get a currently valid access token, refreshing first if needed
    ///
    /// A token inside the refresh threshold but not yet expired is still
    /// handed out when the refresh fails transiently.
    ///
    /// # Errors
    /// - `NotAuthenticated` if there is no session
    /// - `NoRefreshToken`, `SessionRevoked`, `RefreshFailed` if the token is
    ///   expired and could not be renewed
    pub async fn get_access_token(&self) -> Result<String, TokenError> {
        let session = self.current.read().await.clone().ok_or(TokenError::NotAuthenticated)?;

        if !session.access_token.is_empty() && !session.is_expired(self.refresh_threshold_seconds)
        {
            return Ok(session.access_token);
        }

        match self.refresh_session().await {
            Ok(fresh) if fresh.access_token.is_empty() => {
                Err(TokenError::RefreshFailed("auth service returned an empty token".into()))
            }
            Ok(fresh) => Ok(fresh.access_token),
            Err(TokenError::RefreshFailed(reason))
                if !session.access_token.is_empty() && !session.is_expired(0) =>
            {
                warn!(%reason, "Refresh failed, using token that has not expired yet");
                Ok(session.access_token)
            }
            Err(err) => Err(err),
        }
    }

    /// Refresh the session, joining a refresh that is already running
    ///
    /// # Errors
    /// Returns error if refresh fails or no refresh token is available
    pub async fn refresh_session(&self) -> Result<Session, TokenError> {
        let (generation, refresh) = {
            let mut pending = self.pending_refresh.lock();
            match pending.as_ref() {
                Some((generation, refresh)) => {
                    debug!("Joining in-flight session refresh");
                    (*generation, refresh.clone())
                }
                None => {
                    let generation = self.refresh_generation.fetch_add(1, Ordering::SeqCst);
                    let refresh = Self::run_refresh(
                        Arc::clone(&self.refresher),
                        Arc::clone(&self.store),
                        Arc::clone(&self.current),
                    )
                    .boxed()
                    .shared();
                    *pending = Some((generation, refresh.clone()));
                    (generation, refresh)
                }
            }
        };

        let result = refresh.await;

        let mut pending = self.pending_refresh.lock();
        if matches!(pending.as_ref(), Some((current, _)) if *current == generation) {
            *pending = None;
        }

        result
    }

    async fn run_refresh(
        refresher: Arc<R>,
        store: Arc<S>,
        current: Arc<RwLock<Option<Session>>>,
    ) -> Result<Session, TokenError> {
        let refresh_token = {
            let session = current.read().await;
            match session.as_ref() {
                Some(s) => s.refresh_token.clone().ok_or(TokenError::NoRefreshToken)?,
                None => return Err(TokenError::NotAuthenticated),
            }
        };

        match refresher.refresh(&refresh_token).await {
            Ok(session) => {
                store.save(&session).await?;
                *current.write().await = Some(session.clone());
                info!("Successfully refreshed session");
                Ok(session)
            }
            Err(TokenError::SessionRevoked(reason)) => {
                warn!(%reason, "Refresh token rejected, clearing session");
                *current.write().await = None;
                if let Err(e) = store.clear().await {
                    error!("Failed to clear revoked session: {e}");
                }
                Err(TokenError::SessionRevoked(reason))
            }
            Err(err) => {
                error!("Session refresh failed: {err}");
                Err(err)
            }
        }
    }

    /// Clear the session (sign out)
    ///
    /// # Errors
    /// Returns error if the store cannot be cleared
    pub async fn clear_session(&self) -> Result<(), TokenError> {
        self.store.clear().await?;
        *self.current.write().await = None;
        info!("Session cleared (signed out)");
        Ok(())
    }

    /// Check if a session is loaded
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Seconds until the access token expires, `None` without a session
    pub async fn seconds_until_expiry(&self) -> Option<i64> {
        self.current.read().await.as_ref().map(Session::seconds_until_expiry)
    }
}

#[async_trait]
impl<R: SessionRefresher + 'static, S: SessionStore + 'static> AccessTokenProvider
    for TokenManager<R, S>
{
    async fn access_token(&self) -> Result<String, TokenError> {
        self.get_access_token().await
    }
}
