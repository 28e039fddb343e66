use std::time::Duration;

use partnerhub_domain::PartnerHubError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_DIRECTIVES: &str = "info,partnerhub=debug";

/// Output format of the global subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// `json` selects JSON lines, anything else the human-readable format
    pub fn from_env_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG` and falls back to
/// [`DEFAULT_DIRECTIVES`]. Returns `false` if a subscriber was already
/// installed (tests, or a host shell that configured its own).
pub fn init_tracing(format: LogFormat) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let installed = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.is_ok()
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"organizations::list"`).
/// * `elapsed` - Duration the command execution took.
/// * `error` - The failure, if the command failed.
///
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&PartnerHubError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) if err.is_cancelled() => {
            let error_type = error_label(err);
            info!(command, duration_ms, error_type, "command_execution_cancelled");
        }
        Some(err) => warn!(
            command,
            duration_ms,
            error_type = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
    }
}

/// Convert a `PartnerHubError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &PartnerHubError) -> &'static str {
    match error {
        PartnerHubError::Config(_) => "config",
        PartnerHubError::InvalidInput(_) => "invalid_input",
        PartnerHubError::InvalidResponse(_) => "invalid_response",
        other => other.category().label(),
    }
}
