//! # PartnerHub App
//!
//! Application layer - the surface a UI shell binds to.
//!
//! This crate contains:
//! - Commands (shell → backend bridge)
//! - Application context (dependency injection)
//! - Logging setup and bootstrap
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core` and `infra`
//! - Wires up the hexagonal architecture
//! - Commands return `PartnerHubError` untouched so the shell can branch on
//!   its category

pub mod adapters;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
