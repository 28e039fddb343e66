//! Type-erased session store
//!
//! `TokenManager` is generic over its store; the host shell picks the store
//! at runtime (keychain, file, memory), so the context holds it behind a
//! trait object and hands the manager this adapter.

use std::sync::Arc;

use async_trait::async_trait;
use partnerhub_common::auth::{Session, SessionStore, TokenError};

#[derive(Clone)]
pub struct SharedSessionStore {
    inner: Arc<dyn SessionStore>,
}

impl SharedSessionStore {
    pub fn new(inner: Arc<dyn SessionStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SessionStore for SharedSessionStore {
    async fn load(&self) -> Result<Option<Session>, TokenError> {
        self.inner.load().await
    }

    async fn save(&self, session: &Session) -> Result<(), TokenError> {
        self.inner.save(session).await
    }

    async fn clear(&self) -> Result<(), TokenError> {
        self.inner.clear().await
    }
}
