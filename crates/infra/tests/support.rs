//! Shared fixtures for the infra integration suites

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use partnerhub_common::auth::AccessTokenProvider;
use partnerhub_common::testing::StaticTokenProvider;
use partnerhub_common::tracking::RequestTracker;
use partnerhub_infra::http::{FetchOptions, HttpClient};
use partnerhub_infra::ApiClient;
use reqwest::Url;
use serde_json::{json, Value};

pub const TOKEN: &str = "test-access-token";
pub const ANON_KEY: &str = "test-anon-key";

/// Options with short timings so retry tests stay fast
pub fn fast_options() -> FetchOptions {
    FetchOptions::default()
        .timeout(Duration::from_secs(5))
        .retries(0)
        .backoff(Duration::from_millis(10))
        .component("organizations")
}

pub fn http_client(tokens: Arc<dyn AccessTokenProvider>, tracker: Arc<RequestTracker>) -> HttpClient {
    HttpClient::builder()
        .token_provider(tokens)
        .tracker(tracker)
        .api_key(ANON_KEY)
        .user_agent("partnerhub-tests")
        .build()
        .expect("http client should build")
}

pub fn static_client(tracker: Arc<RequestTracker>) -> HttpClient {
    http_client(Arc::new(StaticTokenProvider::new(TOKEN)), tracker)
}

pub fn api_client(base: &str, tracker: Arc<RequestTracker>) -> ApiClient {
    ApiClient::new(static_client(tracker), base, fast_options()).expect("api client should build")
}

pub fn url(base: &str, path: &str) -> Url {
    Url::parse(&format!("{base}{path}")).expect("valid test URL")
}

pub fn organization_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "state": "Lagos", "partner_id": format!("P-{id}") })
}

pub fn organizations_json(count: usize) -> Vec<Value> {
    (0..count).map(|i| organization_json(&format!("org-{i}"), &format!("LAPO {i}"))).collect()
}
