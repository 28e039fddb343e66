//! # PartnerHub Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The safe-fetch HTTP client (bearer token, timeout, retry, tracking)
//! - Domain API clients and response normalization
//! - The auth service refresh adapter
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `partnerhub-core`
//! - Depends on `partnerhub-common` and `partnerhub-domain`
//! - Contains all "impure" code (network, environment, files)

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{AgentsClient, ApiClient, CsvImportClient, OrganizationsClient, SalesClient};
pub use auth::AuthApiRefresher;
pub use errors::{to_domain, InfraError};
pub use http::{FetchBody, FetchOptions, FetchRequest, HttpClient, ResponseKind};
