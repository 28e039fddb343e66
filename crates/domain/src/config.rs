//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE, DEFAULT_REFRESH_THRESHOLD_SECS,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_RETRY_BACKOFF_MS, DEFAULT_RETRY_COUNT,
    DEFAULT_STALE_REQUEST_MS,
};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub views: ViewConfig,
}

/// Backend endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the serverless functions (e.g. `https://x.example.co/functions/v1`)
    pub base_url: String,
    /// Public anon key sent as `apikey`; never serialized back out
    #[serde(default, skip_serializing)]
    pub anon_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:54321/functions/v1".to_string(), anon_key: None }
    }
}

/// Session handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the auth service (e.g. `https://x.example.co/auth/v1`)
    pub url: String,
    /// Refresh the access token this many seconds before it expires
    #[serde(default = "default_refresh_threshold")]
    pub refresh_threshold_seconds: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321/auth/v1".to_string(),
            refresh_threshold_seconds: DEFAULT_REFRESH_THRESHOLD_SECS,
        }
    }
}

/// Safe-fetch defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_ms: u64,
    pub retry_count: u32,
    pub retry_backoff_ms: u64,
    /// Tracked requests older than this are pruned on visibility regain
    pub stale_request_ms: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn stale_request_age(&self) -> Duration {
        Duration::from_millis(self.stale_request_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            stale_request_ms: DEFAULT_STALE_REQUEST_MS,
        }
    }
}

/// View-model defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub debounce_ms: u64,
    pub page_size: u32,
}

impl ViewConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { debounce_ms: DEFAULT_DEBOUNCE_MS, page_size: DEFAULT_PAGE_SIZE }
    }
}

fn default_refresh_threshold() -> i64 {
    DEFAULT_REFRESH_THRESHOLD_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://example.test/functions/v1"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://example.test/functions/v1");
        assert_eq!(config.fetch.timeout_ms, DEFAULT_REQUEST_TIMEOUT_MS);
        assert_eq!(config.views.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.auth.refresh_threshold_seconds, DEFAULT_REFRESH_THRESHOLD_SECS);
    }

    #[test]
    fn test_anon_key_is_not_serialized() {
        let config = Config {
            api: ApiConfig { base_url: "https://x".into(), anon_key: Some("secret".into()) },
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
