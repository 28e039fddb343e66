//! Auth service adapters
//!
//! The session lifecycle lives in `partnerhub_common::auth::TokenManager`;
//! this module only talks to the auth service's token endpoint.

mod refresher;

pub use refresher::AuthApiRefresher;
