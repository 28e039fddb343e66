//! Safe-fetch HTTP layer
//!
//! Every backend call goes through [`HttpClient::fetch`], which attaches the
//! bearer token, races the request against a timeout and the owner's
//! cancellation token, registers it with the shared
//! [`RequestTracker`](partnerhub_common::tracking::RequestTracker) and turns
//! failures into [`PartnerHubError`](partnerhub_domain::PartnerHubError).

mod client;
mod request;

pub use client::{HttpClient, HttpClientBuilder};
pub use request::{request_id, FetchBody, FetchOptions, FetchRequest, ResponseKind};
