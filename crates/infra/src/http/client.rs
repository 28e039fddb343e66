use std::sync::Arc;
use std::time::Duration;

use partnerhub_common::auth::AccessTokenProvider;
use partnerhub_common::tracking::RequestTracker;
use partnerhub_domain::{CancelReason, PartnerHubError, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::request::{FetchBody, FetchOptions, FetchRequest, ResponseKind};
use crate::errors::to_domain;

/// Safe-fetch HTTP client: bearer token, timeout, bounded retry, request
/// tracking and typed error classification around one HTTP call.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    tokens: Arc<dyn AccessTokenProvider>,
    tracker: Arc<RequestTracker>,
    api_key: Option<String>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Tracker every fetch registers with
    pub fn tracker(&self) -> &Arc<RequestTracker> {
        &self.tracker
    }

    /// Run `request` to completion, retrying up to `options.retry_count`
    /// times after retryable failures.
    ///
    /// # Errors
    /// - `Auth` if no token can be obtained (no network call is made) or the
    ///   server answers 401
    /// - `Permission`, `NotFound`, `Server`, `Request` by status code
    /// - `Cancelled(Timeout)` / `Cancelled(Aborted)` when the timer or the
    ///   owner's token stops the call
    /// - `Network` / `InvalidResponse` for transport and decoding failures
    #[instrument(
        skip(self, request, options),
        fields(method = %request.method, url = %request.url, component = %options.component)
    )]
    pub async fn fetch(&self, request: FetchRequest, options: &FetchOptions) -> Result<FetchBody> {
        let request_id = request.id();
        let attempts = options.retry_count.saturating_add(1);

        for attempt in 1..=attempts {
            debug!(attempt, request_id = %request_id, "sending HTTP request");

            match self.attempt(&request, &request_id, options).await {
                Ok(body) => {
                    info!(attempt, "HTTP request succeeded");
                    return Ok(body);
                }
                Err(err) if attempt < attempts && err.should_retry() => {
                    warn!(
                        attempt,
                        error = %err,
                        backoff_ms = options.retry_backoff.as_millis() as u64,
                        "HTTP request failed, retrying"
                    );
                    self.backoff(options).await?;
                }
                Err(err) => {
                    if err.is_cancelled() {
                        debug!(attempt, error = %err, "HTTP request cancelled");
                    } else {
                        warn!(attempt, error = %err, category = err.category().label(), "HTTP request failed");
                    }
                    return Err(err);
                }
            }
        }

        Err(PartnerHubError::Internal(
            "http client exhausted retries without producing a result".into(),
        ))
    }

    /// [`fetch`](Self::fetch) and deserialize a JSON body
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: FetchRequest,
        options: &FetchOptions,
    ) -> Result<T> {
        let options = FetchOptions { response_kind: ResponseKind::Json, ..options.clone() };
        self.fetch(request, &options).await?.deserialize()
    }

    async fn attempt(
        &self,
        request: &FetchRequest,
        request_id: &str,
        options: &FetchOptions,
    ) -> Result<FetchBody> {
        // Token first: without one there is nothing worth sending
        let token = self.tokens.access_token().await.map_err(to_domain)?;

        let cancel = options
            .cancel
            .as_ref()
            .map_or_else(CancellationToken::new, CancellationToken::child_token);
        let _tracking = self.tracker.track(
            request_id,
            cancel.clone(),
            options.component.clone().into_owned(),
            request.url.as_str(),
        );

        let builder = self.prepare(request, &token);

        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(PartnerHubError::Cancelled(CancelReason::Aborted)),
            () = tokio::time::sleep(options.timeout) => {
                cancel.cancel();
                Err(PartnerHubError::Cancelled(CancelReason::Timeout))
            }
            result = send_and_read(builder, options.response_kind) => result,
        }
    }

    fn prepare(&self, request: &FetchRequest, token: &str) -> RequestBuilder {
        let mut headers = request.headers.clone();
        if !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(headers)
            .bearer_auth(token);
        if let Some(key) = &self.api_key {
            builder = builder.header("apikey", key);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }
        builder
    }

    async fn backoff(&self, options: &FetchOptions) -> Result<()> {
        if options.retry_backoff.is_zero() {
            return Ok(());
        }
        match &options.cancel {
            Some(cancel) => tokio::select! {
                () = cancel.cancelled() => Err(PartnerHubError::Cancelled(CancelReason::Aborted)),
                () = tokio::time::sleep(options.retry_backoff) => Ok(()),
            },
            None => {
                tokio::time::sleep(options.retry_backoff).await;
                Ok(())
            }
        }
    }
}

async fn send_and_read(builder: RequestBuilder, kind: ResponseKind) -> Result<FetchBody> {
    let response = builder.send().await.map_err(to_domain)?;
    let status = response.status();
    debug!(%status, "received HTTP response");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(classify_status(status, &body));
    }

    // No body on 204/205
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return Ok(FetchBody::empty(kind));
    }

    match kind {
        ResponseKind::Json => {
            let bytes = response.bytes().await.map_err(to_domain)?;
            if bytes.is_empty() {
                return Ok(FetchBody::Json(Value::Null));
            }
            serde_json::from_slice(&bytes).map(FetchBody::Json).map_err(to_domain)
        }
        ResponseKind::Text => response.text().await.map(FetchBody::Text).map_err(to_domain),
        ResponseKind::Bytes => {
            response.bytes().await.map(|b| FetchBody::Bytes(b.to_vec())).map_err(to_domain)
        }
    }
}

/// Map a non-success status to the error taxonomy
fn classify_status(status: StatusCode, body: &str) -> PartnerHubError {
    let code = status.as_u16();
    let server_message = server_message(body);

    match code {
        401 => PartnerHubError::Auth("please log in again".into()),
        403 => PartnerHubError::Permission(
            server_message.unwrap_or_else(|| "insufficient privileges".into()),
        ),
        404 => PartnerHubError::NotFound(
            server_message.unwrap_or_else(|| format!("endpoint returned {status}")),
        ),
        500..=599 => PartnerHubError::Server {
            status: code,
            message: server_message.unwrap_or_else(|| status.to_string()),
        },
        _ => PartnerHubError::Request {
            status: code,
            message: server_message
                .unwrap_or_else(|| format!("Request failed with status {code}")),
        },
    }
}

/// `error` or `message` from a JSON error body (`error` may itself be an
/// object with a `message`)
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let candidate = match value.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(Value::Object(inner)) => {
            inner.get("message").and_then(Value::as_str).map(str::to_string)
        }
        _ => None,
    };
    candidate
        .or_else(|| value.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|message| !message.trim().is_empty())
}

/// Builder for [`HttpClient`].
#[derive(Default)]
pub struct HttpClientBuilder {
    tokens: Option<Arc<dyn AccessTokenProvider>>,
    tracker: Option<Arc<RequestTracker>>,
    api_key: Option<String>,
    user_agent: Option<String>,
    connect_timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Source of bearer tokens (required)
    pub fn token_provider(mut self, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Shared tracker; a private one is created when omitted
    pub fn tracker(mut self, tracker: Arc<RequestTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Public anon key sent as `apikey` on every request
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// `User-Agent` header value
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// TCP/TLS connect limit, separate from the per-attempt timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// # Errors
    /// `Config` without a token provider, or if reqwest cannot build a client
    pub fn build(self) -> Result<HttpClient> {
        let tokens = self
            .tokens
            .ok_or_else(|| PartnerHubError::Config("HttpClient requires a token provider".into()))?;

        let mut builder = ReqwestClient::builder().no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(to_domain)?;

        Ok(HttpClient {
            client,
            tokens,
            tracker: self.tracker.unwrap_or_default(),
            api_key: self.api_key,
        })
    }
}
