//! Refresh-token exchange against the auth service

use std::time::Duration;

use async_trait::async_trait;
use partnerhub_common::auth::{Session, SessionRefresher, TokenError};
use partnerhub_domain::{AuthConfig, PartnerHubError, Result};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::errors::to_domain;

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
    #[serde(default)]
    user: Option<TokenUser>,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: String,
}

/// [`SessionRefresher`] backed by `POST {auth_url}/token?grant_type=refresh_token`
pub struct AuthApiRefresher {
    client: ReqwestClient,
    token_url: Url,
    anon_key: Option<String>,
}

impl AuthApiRefresher {
    /// # Errors
    /// `Config` if the auth URL is invalid
    pub fn new(config: &AuthConfig, anon_key: Option<String>, timeout: Duration) -> Result<Self> {
        let mut token_url = Url::parse(&config.url)
            .map_err(|e| PartnerHubError::Config(format!("invalid auth URL {}: {e}", config.url)))?;
        token_url
            .path_segments_mut()
            .map_err(|()| PartnerHubError::Config(format!("invalid auth URL {}", config.url)))?
            .pop_if_empty()
            .push("token");
        token_url.query_pairs_mut().append_pair("grant_type", "refresh_token");

        let client = ReqwestClient::builder().timeout(timeout).no_proxy().build().map_err(to_domain)?;
        Ok(Self { client, token_url, anon_key })
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }
}

#[async_trait]
impl SessionRefresher for AuthApiRefresher {
    #[instrument(skip(self, refresh_token))]
    async fn refresh(&self, refresh_token: &str) -> std::result::Result<Session, TokenError> {
        debug!("exchanging refresh token");

        let mut request =
            self.client.post(self.token_url.clone()).json(&json!({ "refresh_token": refresh_token }));
        if let Some(key) = &self.anon_key {
            request = request.header("apikey", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TokenError::RefreshFailed(format!("token endpoint unreachable: {e}")))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "refresh token rejected");
            return Err(TokenError::SessionRevoked(rejection_reason(&body)));
        }
        if !status.is_success() {
            warn!(%status, "token endpoint failed");
            return Err(TokenError::RefreshFailed(format!("token endpoint returned {status}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::RefreshFailed(format!("malformed token response: {e}")))?;

        // Some deployments rotate refresh tokens, others keep the old one
        let refresh_token = token.refresh_token.or_else(|| Some(refresh_token.to_string()));
        let mut session = Session::new(token.access_token, refresh_token, token.expires_in);
        if let Some(user) = token.user {
            session = session.with_user_id(user.id);
        }

        info!(expires_in = token.expires_in, "session refreshed");
        Ok(session)
    }
}

fn rejection_reason(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| "refresh token rejected".to_string())
}
