//! Shared fixtures for the command suites

#![allow(dead_code)]

use std::sync::Arc;

use partnerhub_app::AppContext;
use partnerhub_common::auth::{MemorySessionStore, Session};
use partnerhub_domain::{ApiConfig, AuthConfig, Config, FetchConfig};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const ACCESS_TOKEN: &str = "access-1";
pub const REFRESH_TOKEN: &str = "refresh-1";
pub const ANON_KEY: &str = "anon-key";

/// Config pointing both services at `server`, with fast fetch timings
pub fn test_config(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}/functions/v1", server.uri()),
            anon_key: Some(ANON_KEY.to_string()),
        },
        auth: AuthConfig {
            url: format!("{}/auth/v1", server.uri()),
            refresh_threshold_seconds: 60,
        },
        fetch: FetchConfig {
            timeout_ms: 5_000,
            retry_count: 0,
            retry_backoff_ms: 10,
            ..FetchConfig::default()
        },
        ..Config::default()
    }
}

/// Context with no stored session
pub async fn signed_out_context(server: &MockServer) -> AppContext {
    let ctx = AppContext::new(test_config(server), Arc::new(MemorySessionStore::new()))
        .expect("context should wire");
    ctx.initialize().await.expect("empty store loads");
    ctx
}

/// Context restored from a stored session that expires in `expires_in`
/// seconds
pub async fn context_with_session(server: &MockServer, expires_in: i64) -> AppContext {
    let session =
        Session::new(ACCESS_TOKEN.to_string(), Some(REFRESH_TOKEN.to_string()), expires_in);
    let store = Arc::new(MemorySessionStore::with_session(session));
    let ctx = AppContext::new(test_config(server), store).expect("context should wire");
    assert!(ctx.initialize().await.expect("session loads"));
    ctx
}

pub async fn signed_in_context(server: &MockServer) -> AppContext {
    context_with_session(server, 3_600).await
}

pub fn organization_json(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "state": "Lagos", "partner_id": format!("P-{id}") })
}

pub fn sale_json(id: &str, state: &str, quantity: u32) -> Value {
    json!({
        "id": id,
        "state": state,
        "quantity": quantity,
        "organization_id": format!("org-{state}"),
        "amount": 100.0 * f64::from(quantity)
    })
}

/// Number of requests `server` has received
pub async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |requests| requests.len())
}
