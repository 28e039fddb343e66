//! In-memory session store

use async_trait::async_trait;
use parking_lot::Mutex;

use super::traits::SessionStore;
use super::types::{Session, TokenError};

/// Session store that lives as long as the process
///
/// Used by shells that keep the session elsewhere (browser storage, OS
/// keychain) and hand it over on startup, and by tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { session: Mutex::new(Some(session)) }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, TokenError> {
        Ok(self.session.lock().clone())
    }

    async fn save(&self, session: &Session) -> Result<(), TokenError> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenError> {
        *self.session.lock() = None;
        Ok(())
    }
}
