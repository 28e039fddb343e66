//! Conversions from external infrastructure errors into domain errors.

use csv::Error as CsvError;
use partnerhub_common::auth::TokenError;
use partnerhub_domain::{CancelReason, PartnerHubError};
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PartnerHubError);

impl From<InfraError> for PartnerHubError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PartnerHubError> for InfraError {
    fn from(value: PartnerHubError) -> Self {
        InfraError(value)
    }
}

/// Map any error with an [`InfraError`] conversion straight to the domain
/// error, for use with `map_err`
pub fn to_domain<E>(err: E) -> PartnerHubError
where
    InfraError: From<E>,
{
    InfraError::from(err).into()
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPartnerHubError {
    fn into_partnerhub(self) -> PartnerHubError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PartnerHubError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerHubError for HttpError {
    fn into_partnerhub(self) -> PartnerHubError {
        if self.is_timeout() {
            return PartnerHubError::Cancelled(CancelReason::Timeout);
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PartnerHubError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return PartnerHubError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return PartnerHubError::InvalidResponse(format!("failed to read response: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 => PartnerHubError::Auth(message),
                403 => PartnerHubError::Permission(message),
                404 => PartnerHubError::NotFound(message),
                500..=599 => PartnerHubError::Server { status: code, message },
                _ => PartnerHubError::Request { status: code, message },
            };
        }

        PartnerHubError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_partnerhub())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → PartnerHubError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerHubError for JsonError {
    fn into_partnerhub(self) -> PartnerHubError {
        PartnerHubError::InvalidResponse(format!("malformed JSON: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_partnerhub())
    }
}

/* -------------------------------------------------------------------------- */
/* csv::Error → PartnerHubError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerHubError for CsvError {
    fn into_partnerhub(self) -> PartnerHubError {
        match self.position() {
            Some(position) => PartnerHubError::Validation(format!(
                "CSV error on line {}: {self}",
                position.line()
            )),
            None => PartnerHubError::Validation(format!("CSV error: {self}")),
        }
    }
}

impl From<CsvError> for InfraError {
    fn from(value: CsvError) -> Self {
        InfraError(value.into_partnerhub())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → PartnerHubError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerHubError for std::io::Error {
    fn into_partnerhub(self) -> PartnerHubError {
        match self.kind() {
            std::io::ErrorKind::NotFound => PartnerHubError::NotFound(self.to_string()),
            std::io::ErrorKind::InvalidData => PartnerHubError::InvalidInput(self.to_string()),
            _ => PartnerHubError::Internal(format!("I/O error: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_partnerhub())
    }
}

/* -------------------------------------------------------------------------- */
/* TokenError → PartnerHubError */
/* -------------------------------------------------------------------------- */

impl IntoPartnerHubError for TokenError {
    /// Any failure to produce a token is an authentication failure for the
    /// request that needed it
    fn into_partnerhub(self) -> PartnerHubError {
        PartnerHubError::Auth(self.to_string())
    }
}

impl From<TokenError> for InfraError {
    fn from(value: TokenError) -> Self {
        InfraError(value.into_partnerhub())
    }
}
