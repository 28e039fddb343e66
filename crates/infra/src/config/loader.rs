//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required ones are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `PARTNERHUB_API_URL`: Base URL of the serverless functions
//! - `PARTNERHUB_AUTH_URL`: Base URL of the auth service
//!
//! Optional (defaults in `partnerhub_domain::constants`):
//! - `PARTNERHUB_ANON_KEY`: Public anon key sent as `apikey`
//! - `PARTNERHUB_REQUEST_TIMEOUT_MS`, `PARTNERHUB_RETRY_COUNT`,
//!   `PARTNERHUB_RETRY_BACKOFF_MS`, `PARTNERHUB_STALE_REQUEST_MS`
//! - `PARTNERHUB_DEBOUNCE_MS`, `PARTNERHUB_PAGE_SIZE`
//! - `PARTNERHUB_REFRESH_THRESHOLD_SECS`
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./partnerhub.json` or `./partnerhub.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use partnerhub_domain::constants::MAX_PAGE_SIZE;
use partnerhub_domain::{
    ApiConfig, AuthConfig, Config, FetchConfig, PartnerHubError, Result, ViewConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `PartnerHubError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value is out of range
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `PartnerHubError::Config` if a required variable is missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let fetch_defaults = FetchConfig::default();
    let view_defaults = ViewConfig::default();
    let auth_defaults = AuthConfig::default();

    let config = Config {
        api: ApiConfig {
            base_url: env_var("PARTNERHUB_API_URL")?,
            anon_key: std::env::var("PARTNERHUB_ANON_KEY").ok().filter(|k| !k.is_empty()),
        },
        auth: AuthConfig {
            url: env_var("PARTNERHUB_AUTH_URL")?,
            refresh_threshold_seconds: env_parse(
                "PARTNERHUB_REFRESH_THRESHOLD_SECS",
                auth_defaults.refresh_threshold_seconds,
            )?,
        },
        fetch: FetchConfig {
            timeout_ms: env_parse("PARTNERHUB_REQUEST_TIMEOUT_MS", fetch_defaults.timeout_ms)?,
            retry_count: env_parse("PARTNERHUB_RETRY_COUNT", fetch_defaults.retry_count)?,
            retry_backoff_ms: env_parse(
                "PARTNERHUB_RETRY_BACKOFF_MS",
                fetch_defaults.retry_backoff_ms,
            )?,
            stale_request_ms: env_parse(
                "PARTNERHUB_STALE_REQUEST_MS",
                fetch_defaults.stale_request_ms,
            )?,
        },
        views: ViewConfig {
            debounce_ms: env_parse("PARTNERHUB_DEBOUNCE_MS", view_defaults.debounce_ms)?,
            page_size: env_parse("PARTNERHUB_PAGE_SIZE", view_defaults.page_size)?,
        },
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PartnerHubError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value is out of range
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PartnerHubError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PartnerHubError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PartnerHubError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PartnerHubError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PartnerHubError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PartnerHubError::Config(format!("Unsupported config format: {}", extension))),
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.api.base_url.trim().is_empty() {
        return Err(PartnerHubError::Config("api.base_url must not be empty".into()));
    }
    if config.fetch.timeout_ms == 0 {
        return Err(PartnerHubError::Config("fetch.timeout_ms must be positive".into()));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&config.views.page_size) {
        return Err(PartnerHubError::Config(format!(
            "views.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            config.views.page_size
        )));
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("partnerhub.json"),
        dir.join("partnerhub.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        PartnerHubError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse an optional environment variable, `default` when unset or empty
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| PartnerHubError::Config(format!("Invalid value for {key}: {e}"))),
        _ => Ok(default),
    }
}
