//! CSV bulk-import payloads

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One parsed CSV data row keyed by header name, as uploaded
pub type ImportRow = BTreeMap<String, String>;

/// Counters returned by `/csv-import`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCounts {
    pub total_rows: u64,
    pub organizations_created: u64,
    pub organizations_updated: u64,
    pub errors_count: u64,
}

/// Reference to an organization touched by the import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedOrganization {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(default, alias = "partner_name")]
    pub name: Option<String>,
}

/// Server-side rejection of a single row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRowError {
    #[serde(default)]
    pub row: Option<u64>,
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(alias = "message")]
    pub error: String,
}

/// Full `/csv-import` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub summary: ImportCounts,
    #[serde(default)]
    pub created: Vec<ImportedOrganization>,
    #[serde(default)]
    pub updated: Vec<ImportedOrganization>,
    #[serde(default)]
    pub errors: Vec<ImportRowError>,
}
