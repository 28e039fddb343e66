//! Request, options and body types for the safe-fetch client

use std::borrow::Cow;
use std::time::Duration;

use partnerhub_domain::constants::{
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_RETRY_COUNT,
};
use partnerhub_domain::{FetchConfig, PartnerHubError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio_util::sync::CancellationToken;
use url::Url;

/// One logical HTTP call; retries resend the same request
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl FetchRequest {
    /// Request without headers or body
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: HeaderMap::new(), body: None }
    }

    /// `GET url`
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// `DELETE url`
    pub fn delete(url: Url) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// JSON body, sent with `Content-Type: application/json`
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a caller header; invalid names or values are rejected
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| PartnerHubError::InvalidInput(format!("invalid header name: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| PartnerHubError::InvalidInput(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Tracking id: `"METHOD url #hash"`
    pub fn id(&self) -> String {
        request_id(&self.method, self.url.as_str(), self.body.as_ref())
    }
}

/// Deterministic id for tracking and log correlation
///
/// Identical method, URL and body always give the same id. The id is only a
/// label; it does not deduplicate requests.
pub fn request_id(method: &Method, url: &str, body: Option<&Value>) -> String {
    let body = body.map(Value::to_string).unwrap_or_default();
    let digest = Sha256::digest(body.as_bytes());
    format!("{method} {url} #{}", &hex::encode(digest)[..8])
}

/// How the response body is decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseKind {
    #[default]
    Json,
    Text,
    /// Raw bytes, for binary export formats
    Bytes,
}

/// Response body decoded per [`ResponseKind`]
#[derive(Debug, Clone, PartialEq)]
pub enum FetchBody {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl FetchBody {
    /// Empty body of the requested kind (204/205 responses)
    pub(crate) fn empty(kind: ResponseKind) -> Self {
        match kind {
            ResponseKind::Json => Self::Json(Value::Null),
            ResponseKind::Text => Self::Text(String::new()),
            ResponseKind::Bytes => Self::Bytes(Vec::new()),
        }
    }

    /// The body as JSON, parsing text and bytes when needed
    pub fn into_json(self) -> Result<Value> {
        match self {
            Self::Json(value) => Ok(value),
            Self::Text(text) => serde_json::from_str(&text)
                .map_err(|e| PartnerHubError::InvalidResponse(format!("expected JSON body: {e}"))),
            Self::Bytes(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| PartnerHubError::InvalidResponse(format!("expected JSON body: {e}"))),
        }
    }

    /// Raw payload; JSON bodies are re-serialized
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Json(value) => value.to_string().into_bytes(),
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }

    /// Decode into `T`, reporting shape mismatches as `InvalidResponse`
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.into_json()?)
            .map_err(|e| PartnerHubError::InvalidResponse(format!("unexpected response shape: {e}")))
    }
}

/// Per-call safe-fetch settings
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Wall-clock limit per attempt; expiry cancels the attempt
    pub timeout: Duration,
    /// Retries after the first attempt
    pub retry_count: u32,
    /// Fixed wait between attempts
    pub retry_backoff: Duration,
    /// Component the request is tracked under
    pub component: Cow<'static, str>,
    pub response_kind: ResponseKind,
    /// Owner's token; cancelling it aborts the call, including any backoff
    pub cancel: Option<CancellationToken>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            retry_count: DEFAULT_RETRY_COUNT,
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
            component: Cow::Borrowed("default"),
            response_kind: ResponseKind::Json,
            cancel: None,
        }
    }
}

impl FetchOptions {
    pub fn from_config(config: &FetchConfig) -> Self {
        Self {
            timeout: config.timeout(),
            retry_count: config.retry_count,
            retry_backoff: config.retry_backoff(),
            ..Self::default()
        }
    }

    pub fn component(mut self, component: impl Into<Cow<'static, str>>) -> Self {
        self.component = component.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retries(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn response_kind(mut self, kind: ResponseKind) -> Self {
        self.response_kind = kind;
        self
    }

    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
