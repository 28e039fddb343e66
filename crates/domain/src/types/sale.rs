//! Sales, stove inventory and export types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Sales transaction as returned by `/sales-advanced`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    #[serde(default)]
    pub sales_reference: Option<String>,
    /// Date string as entered upstream (`YYYY-MM-DD` or RFC 3339)
    #[serde(default)]
    pub sales_date: Option<String>,
    #[serde(default, alias = "customer")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stove_ids: Vec<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub sales_rep: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Sort direction for sales listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query filters for the advanced sales list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Sent as repeated `state` parameters
    #[serde(rename = "state", default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Body for recording a sale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleInput {
    pub organization_id: String,
    pub quantity: u32,
    pub stove_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_rep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Export formats accepted by the `format` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Json,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Json => "json",
        }
    }
}

/// Raw export body, ready to be written to disk or handed to a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub format: ExportFormat,
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Stove unit in the inventory (`/stove-ids`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoveRecord {
    pub stove_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub sale_id: Option<String>,
    #[serde(default)]
    pub sold_at: Option<DateTime<Utc>>,
}

/// Query filters for the stove inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoveIdFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

/// Per-state aggregate feeding the geographic heatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSalesPoint {
    pub state: String,
    pub sales_count: u64,
    pub total_quantity: u64,
    /// `total_quantity` scaled to 0..=1 against the busiest state
    pub intensity: f64,
}

/// Dashboard header totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTotals {
    pub sales_count: u64,
    pub total_quantity: u64,
    pub total_amount: f64,
    pub states_covered: usize,
    pub partners_covered: usize,
}
