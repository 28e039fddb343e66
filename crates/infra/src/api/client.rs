//! Base client shared by the domain API clients
//!
//! Resolves endpoint URLs against the functions base URL and runs every call
//! through the safe-fetch [`HttpClient`] with the caller's scope attached.

use partnerhub_core::RequestScope;
use partnerhub_domain::{PartnerHubError, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::normalize::normalize_item;
use super::query::QueryParams;
use crate::http::{FetchOptions, FetchRequest, HttpClient, ResponseKind};

#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    defaults: FetchOptions,
}

impl ApiClient {
    /// # Errors
    /// `Config` if `base_url` is not an absolute http(s) URL
    pub fn new(http: HttpClient, base_url: &str, defaults: FetchOptions) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PartnerHubError::Config(format!("invalid API base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(PartnerHubError::Config(format!(
                "API base URL must be an absolute http(s) URL: {base_url}"
            )));
        }
        Ok(Self { http, base_url, defaults })
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// `base_url` with `segments` appended, each percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PartnerHubError::Config(format!("cannot extend {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// [`endpoint`](Self::endpoint) with a query string
    pub fn endpoint_with_query(&self, segments: &[&str], query: &QueryParams) -> Result<Url> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }
        Ok(url)
    }

    /// Default options tagged with the scope's component and token
    pub fn options(&self, scope: &RequestScope) -> FetchOptions {
        self.defaults
            .clone()
            .component(scope.component().to_owned())
            .cancel_with(scope.token().clone())
    }

    #[instrument(skip(self, scope), fields(component = scope.component()))]
    pub async fn get_json(&self, url: Url, scope: &RequestScope) -> Result<Value> {
        self.http.fetch(FetchRequest::get(url), &self.options(scope)).await?.into_json()
    }

    /// GET a single record, unwrapping its envelope
    pub async fn get_item<T: DeserializeOwned>(&self, url: Url, scope: &RequestScope) -> Result<T> {
        normalize_item(self.get_json(url, scope).await?)
    }

    #[instrument(skip(self, body, scope), fields(component = scope.component()))]
    pub async fn send_json(
        &self,
        method: Method,
        url: Url,
        body: Value,
        scope: &RequestScope,
    ) -> Result<Value> {
        let request = FetchRequest::new(method, url).with_body(body);
        self.http.fetch(request, &self.options(scope)).await?.into_json()
    }

    /// GET without JSON decoding (exports)
    #[instrument(skip(self, scope), fields(component = scope.component()))]
    pub async fn get_raw(&self, url: Url, scope: &RequestScope) -> Result<Vec<u8>> {
        let options = self.options(scope).response_kind(ResponseKind::Bytes);
        Ok(self.http.fetch(FetchRequest::get(url), &options).await?.into_bytes())
    }

    #[instrument(skip(self, scope), fields(component = scope.component()))]
    pub async fn delete(&self, url: Url, scope: &RequestScope) -> Result<()> {
        let options = self.options(scope).response_kind(ResponseKind::Text);
        self.http.fetch(FetchRequest::delete(url), &options).await?;
        Ok(())
    }
}

/// JSON body from a serializable input
pub(crate) fn to_body<T: serde::Serialize + ?Sized>(input: &T) -> Result<Value> {
    serde_json::to_value(input)
        .map_err(|e| PartnerHubError::InvalidInput(format!("unserializable request body: {e}")))
}
