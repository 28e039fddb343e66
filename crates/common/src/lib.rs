//! Modular common utilities shared across PartnerHub crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: field-level validation errors
//! - `runtime`: session token management and in-flight request tracking
//! - `test-utils`: mock token providers, refreshers and stores

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod validation;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod auth;
#[cfg(feature = "runtime")]
pub mod tracking;

// Testing utilities
// -----------------------------------------------------------------
#[cfg(all(feature = "runtime", any(test, feature = "test-utils")))]
pub mod testing;
