//! Integration tests for the auth service refresh adapter
//!
//! **Coverage:**
//! - Refresh-token exchange against the token endpoint
//! - Rejected refresh tokens surface as revoked sessions
//! - Token manager wired to the real refresher renews an expired session

use std::sync::Arc;
use std::time::Duration;

use partnerhub_common::auth::{
    MemorySessionStore, Session, SessionRefresher, SessionStore, TokenError, TokenManager,
};
use partnerhub_domain::AuthConfig;
use partnerhub_infra::AuthApiRefresher;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn refresher(server: &MockServer) -> AuthApiRefresher {
    let config = AuthConfig { url: format!("{}/auth/v1", server.uri()), ..Default::default() };
    AuthApiRefresher::new(&config, Some("anon".into()), Duration::from_secs(5))
        .expect("refresher should build")
}

async fn mount_token_endpoint(server: &MockServer, refresh_token: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(header("apikey", "anon"))
        .and(body_json(json!({ "refresh_token": refresh_token })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn refresh_exchanges_token() {
    let server = MockServer::start().await;
    mount_token_endpoint(
        &server,
        "r1",
        ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "a2",
            "refresh_token": "r2",
            "expires_in": 3600,
            "token_type": "bearer",
            "user": {"id": "u-1"}
        })),
    )
    .await;

    let session = refresher(&server).refresh("r1").await.expect("refresh should succeed");

    assert_eq!(session.access_token, "a2");
    assert_eq!(session.refresh_token.as_deref(), Some("r2"));
    assert_eq!(session.user_id.as_deref(), Some("u-1"));
    assert!(!session.is_expired(60));
}

#[tokio::test]
async fn rejected_refresh_token_revokes_session() {
    let server = MockServer::start().await;
    mount_token_endpoint(
        &server,
        "stale",
        ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid Refresh Token: Already Used"
        })),
    )
    .await;

    let result = refresher(&server).refresh("stale").await;

    assert_eq!(
        result,
        Err(TokenError::SessionRevoked("Invalid Refresh Token: Already Used".into()))
    );
}

#[tokio::test]
async fn unavailable_token_endpoint_is_transient() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, "r1", ResponseTemplate::new(503)).await;

    let result = refresher(&server).refresh("r1").await;

    assert!(matches!(result, Err(TokenError::RefreshFailed(_))), "got {result:?}");
}

#[tokio::test]
async fn token_manager_renews_expired_session() {
    let server = MockServer::start().await;
    mount_token_endpoint(
        &server,
        "r1",
        ResponseTemplate::new(200)
            .set_body_json(json!({"access_token": "fresh", "expires_in": 3600})),
    )
    .await;

    let store = Arc::new(MemorySessionStore::with_session(Session::new(
        "expired".into(),
        Some("r1".into()),
        -30,
    )));
    let manager = TokenManager::new(refresher(&server), Arc::clone(&store), 60);
    assert!(manager.initialize().await.expect("initialize"));

    assert_eq!(manager.get_access_token().await.expect("token"), "fresh");

    // the refresh token is kept when the endpoint does not rotate it
    let stored = store.load().await.expect("load").expect("session persisted");
    assert_eq!(stored.access_token, "fresh");
    assert_eq!(stored.refresh_token.as_deref(), Some("r1"));
}
