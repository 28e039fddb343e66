//! Domain types and models
//!
//! Records here are owned by the backend; the client only passes them
//! through, so optional columns default rather than fail.

pub mod agent;
pub mod import;
pub mod organization;
pub mod pagination;
pub mod sale;

use serde::{Deserialize, Deserializer};

pub use agent::{Agent, AgentDecision, AgentFilters, AgentStatus};
pub use import::{ImportCounts, ImportRow, ImportRowError, ImportSummary, ImportedOrganization};
pub use organization::{Organization, OrganizationFilters, OrganizationInput};
pub use pagination::{ApiResponse, Page, PageInfo, PageRequest, Pagination};
pub use sale::{
    ExportFormat, ExportPayload, Sale, SaleInput, SalesFilters, SalesTotals, SortOrder,
    StateSalesPoint, StoveIdFilters, StoveRecord,
};

/// Reads an explicit `null` as the field's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
