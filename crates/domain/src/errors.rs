//! Error types used throughout the application
//!
//! `PartnerHubError` is produced once, at the safe-fetch boundary, and carried
//! unchanged through clients, services and view models. Callers branch on the
//! variant (or on [`ErrorCategory`]), never on message text.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an in-flight request stopped before producing a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// The per-request timer fired
    Timeout,
    /// Cancelled by its owner (unmount, cancel-all, stale pruning)
    Aborted,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// Main error type for PartnerHub
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum PartnerHubError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    #[error("Request {0}")]
    Cancelled(CancelReason),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse buckets used by the UI layer to choose how an error is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Auth,
    Permission,
    NotFound,
    Server,
    Cancelled,
    Validation,
    Request,
    Network,
    Internal,
}

impl ErrorCategory {
    /// Stable label for logs and metrics
    pub fn label(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::NotFound => "not_found",
            Self::Server => "server",
            Self::Cancelled => "cancelled",
            Self::Validation => "validation",
            Self::Request => "request",
            Self::Network => "network",
            Self::Internal => "internal",
        }
    }
}

impl PartnerHubError {
    /// Get the category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Auth(_) => ErrorCategory::Auth,
            Self::Permission(_) => ErrorCategory::Permission,
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::Server { .. } => ErrorCategory::Server,
            Self::Cancelled(_) => ErrorCategory::Cancelled,
            Self::Validation(_) | Self::InvalidInput(_) => ErrorCategory::Validation,
            Self::Request { .. } => ErrorCategory::Request,
            Self::Network(_) => ErrorCategory::Network,
            Self::InvalidResponse(_) | Self::Config(_) | Self::Internal(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Whether a bounded retry may be attempted.
    ///
    /// Auth, permission and cancellation failures are final; everything else
    /// may be retried up to the caller's bound.
    pub fn should_retry(&self) -> bool {
        !matches!(self, Self::Auth(_) | Self::Permission(_) | Self::Cancelled(_))
    }

    /// True for requests stopped by timeout or by their owner
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Cancelled requests are not user-actionable and stay out of error UI
    pub fn is_user_visible(&self) -> bool {
        !self.is_cancelled()
    }

    /// Human-readable message for the presentation layer
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(_) => "Your session has expired. Please log in again.".to_string(),
            Self::Permission(_) => {
                "Access denied. You do not have permission to perform this action.".to_string()
            }
            Self::NotFound(_) => {
                "The requested resource was not found. Please check the service configuration."
                    .to_string()
            }
            Self::Server { .. } => {
                "The server encountered an error. Please try again in a moment.".to_string()
            }
            Self::Cancelled(_) => "The request was cancelled.".to_string(),
            Self::Request { message, .. } => message.clone(),
            Self::Network(_) => {
                "Unable to reach the server. Check your connection and try again.".to_string()
            }
            Self::Validation(message) | Self::InvalidInput(message) => message.clone(),
            Self::InvalidResponse(_) | Self::Config(_) | Self::Internal(_) => {
                "An unexpected error occurred.".to_string()
            }
        }
    }
}

/// Result type alias for PartnerHub operations
pub type Result<T> = std::result::Result<T, PartnerHubError>;
