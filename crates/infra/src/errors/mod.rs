//! Infrastructure error conversions
//!
//! External error types (reqwest, serde_json, csv, I/O, token errors) are
//! mapped into [`PartnerHubError`](partnerhub_domain::PartnerHubError)
//! through the [`InfraError`] newtype, since neither side of those
//! conversions is defined in this crate.

mod conversions;

pub use conversions::{to_domain, InfraError};
