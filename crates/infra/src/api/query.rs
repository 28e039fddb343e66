//! Query-string shaping for list endpoints

use partnerhub_domain::{PageRequest, PartnerHubError, Result};
use serde::Serialize;
use serde_json::Value;

/// Ordered query parameters
///
/// Built from a filter struct: null and empty values are dropped, arrays
/// become repeated keys and scalars are stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// `InvalidInput` if `filters` does not serialize to an object
    pub fn from_filters<F: Serialize + ?Sized>(filters: &F) -> Result<Self> {
        let value = serde_json::to_value(filters)
            .map_err(|e| PartnerHubError::InvalidInput(format!("unserializable filters: {e}")))?;

        let mut params = Self::new();
        match value {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    params.push_value(&key, value);
                }
            }
            other => {
                return Err(PartnerHubError::InvalidInput(format!(
                    "filters must serialize to an object, got {other}"
                )))
            }
        }
        Ok(params)
    }

    /// Append `limit` and `offset` for `page`
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.push("limit", page.limit.to_string());
        self.push("offset", page.offset().to_string());
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// All values for `key`, in insertion order
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn push_value(&mut self, key: &str, value: Value) {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(scalar) = scalar(item) {
                        self.push(key, scalar);
                    }
                }
            }
            other => {
                if let Some(scalar) = scalar(other) {
                    self.push(key, scalar);
                }
            }
        }
    }
}

fn scalar(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested @ (Value::Array(_) | Value::Object(_)) => Some(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use partnerhub_domain::{OrganizationFilters, SalesFilters};
    use serde_json::json;

    use super::*;

    #[test]
    fn drops_empty_and_null_values() {
        let params = QueryParams::from_filters(&json!({
            "search": "",
            "state": null,
            "branch": "   ",
            "status": "active"
        }))
        .unwrap();

        assert_eq!(params.pairs(), &[("status".to_string(), "active".to_string())]);
    }

    #[test]
    fn arrays_become_repeated_keys() {
        let filters =
            SalesFilters { states: vec!["Lagos".into(), "Oyo".into()], ..Default::default() };
        let params = QueryParams::from_filters(&filters).unwrap();

        assert_eq!(params.get_all("state"), vec!["Lagos", "Oyo"]);
    }

    #[test]
    fn scalars_are_stringified() {
        let params = QueryParams::from_filters(&json!({"active": true, "min": 3})).unwrap();
        assert_eq!(params.get_all("active"), vec!["true"]);
        assert_eq!(params.get_all("min"), vec!["3"]);
    }

    #[test]
    fn page_becomes_limit_and_offset() {
        let filters = OrganizationFilters { search: Some("LAPO".into()), ..Default::default() };
        let params = QueryParams::from_filters(&filters)
            .unwrap()
            .with_page(PageRequest::new(2, 10));

        assert_eq!(params.get_all("search"), vec!["LAPO"]);
        assert_eq!(params.get_all("limit"), vec!["10"]);
        assert_eq!(params.get_all("offset"), vec!["10"]);
    }

    #[test]
    fn non_object_filters_are_rejected() {
        assert!(QueryParams::from_filters(&json!([1, 2])).is_err());
        assert!(QueryParams::from_filters(&()).unwrap().is_empty());
    }
}
