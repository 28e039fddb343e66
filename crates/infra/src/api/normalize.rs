//! Response normalization
//!
//! The backend is inconsistent about envelopes: some list endpoints return a
//! bare array, some `{data: [...]}`, some `{data: {data: [...]}}`, with the
//! pagination block at either level. Everything is folded into
//! [`ApiResponse`] here so nothing above this module sees the difference.

use partnerhub_domain::{ApiResponse, Pagination, PartnerHubError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Pagination as sent by the backend; some endpoints use `page` instead of
/// `offset`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPagination {
    limit: u32,
    offset: Option<u32>,
    page: Option<u32>,
    total: u64,
}

impl From<RawPagination> for Pagination {
    fn from(raw: RawPagination) -> Self {
        let offset = raw.offset.unwrap_or_else(|| {
            raw.page.map_or(0, |page| page.saturating_sub(1).saturating_mul(raw.limit))
        });
        Self { limit: raw.limit, offset, total: raw.total }
    }
}

/// Fold any supported list envelope into an [`ApiResponse`]
///
/// # Errors
/// - `Request` if the envelope reports `success: false`
/// - `InvalidResponse` for any other shape, or rows that do not deserialize
pub fn normalize_list<T: DeserializeOwned>(body: Value) -> Result<ApiResponse<T>> {
    match body {
        Value::Array(items) => Ok(ApiResponse::ok(rows(items)?, None)),
        Value::Object(mut envelope) => {
            reject_unsuccessful(&envelope)?;
            let outer_pagination = pagination(envelope.remove("pagination"))?;

            match envelope.remove("data") {
                Some(Value::Array(items)) => Ok(ApiResponse::ok(rows(items)?, outer_pagination)),
                Some(Value::Object(mut inner)) => match inner.remove("data") {
                    Some(Value::Array(items)) => {
                        let pagination = pagination(inner.remove("pagination"))?.or(outer_pagination);
                        Ok(ApiResponse::ok(rows(items)?, pagination))
                    }
                    _ => Err(unexpected("`data` object without a `data` array")),
                },
                Some(_) => Err(unexpected("`data` is neither an array nor an object")),
                None => Err(unexpected("object without `data`")),
            }
        }
        Value::Null => Err(unexpected("empty body")),
        _ => Err(unexpected("scalar body")),
    }
}

/// Unwrap a single-record envelope (`{data: {...}}`, `{data: {data: {...}}}`
/// or the bare record)
///
/// # Errors
/// - `Request` if the envelope reports `success: false`
/// - `InvalidResponse` if the record does not deserialize
pub fn normalize_item<T: DeserializeOwned>(body: Value) -> Result<T> {
    let mut record = body;
    for _ in 0..2 {
        match record {
            Value::Object(mut envelope) if envelope.contains_key("data") => {
                reject_unsuccessful(&envelope)?;
                record = envelope.remove("data").unwrap_or(Value::Null);
            }
            other => {
                record = other;
                break;
            }
        }
    }
    serde_json::from_value(record)
        .map_err(|e| PartnerHubError::InvalidResponse(format!("unexpected record shape: {e}")))
}

fn rows<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>> {
    serde_json::from_value(Value::Array(items))
        .map_err(|e| PartnerHubError::InvalidResponse(format!("unexpected row shape: {e}")))
}

fn pagination(value: Option<Value>) -> Result<Option<Pagination>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value::<RawPagination>(value)
            .map(|raw| Some(raw.into()))
            .map_err(|e| PartnerHubError::InvalidResponse(format!("unexpected pagination: {e}"))),
    }
}

fn reject_unsuccessful(envelope: &Map<String, Value>) -> Result<()> {
    if envelope.get("success") != Some(&Value::Bool(false)) {
        return Ok(());
    }
    let message = envelope
        .get("error")
        .or_else(|| envelope.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("request was not successful")
        .to_string();
    Err(PartnerHubError::Request { status: 200, message })
}

fn unexpected(what: &str) -> PartnerHubError {
    PartnerHubError::InvalidResponse(format!("unsupported list envelope: {what}"))
}
