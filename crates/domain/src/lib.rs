//! # PartnerHub Domain
//!
//! Business domain types and models for PartnerHub.
//!
//! This crate contains:
//! - Transfer objects for organizations, sales, stove IDs and agents
//! - Filters, pagination and the normalized list envelope
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other PartnerHub crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
