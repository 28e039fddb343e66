//! Session token management
//!
//! Hands out bearer tokens for outgoing requests and keeps the session
//! fresh.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  TokenManager   │  AccessTokenProvider implementation
//! └────────┬────────┘
//!          │
//!          ├──► SessionRefresher   (auth service refresh grant)
//!          └──► SessionStore       (where the session is persisted)
//! ```
//!
//! The manager guarantees that concurrent callers observing an expired
//! token share one refresh operation.

pub mod store;
pub mod token_manager;
pub mod traits;
pub mod types;

pub use store::MemorySessionStore;
pub use token_manager::TokenManager;
pub use traits::{AccessTokenProvider, SessionRefresher, SessionStore};
pub use types::{Session, TokenError};
