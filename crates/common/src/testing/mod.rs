//! Testing utilities and helpers
//!
//! - **[`mocks`]**: token providers and session refreshers with scripted
//!   outcomes
//!
//! ## Usage
//!
//! ```rust
//! use partnerhub_common::testing::{FailingTokenProvider, StaticTokenProvider};
//!
//! let ok = StaticTokenProvider::new("token");
//! let denied = FailingTokenProvider::not_authenticated();
//! # let _ = (ok, denied);
//! ```

pub mod mocks;

pub use mocks::{FailingTokenProvider, RotatingTokenProvider, ScriptedRefresher, StaticTokenProvider};
