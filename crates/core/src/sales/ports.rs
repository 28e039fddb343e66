//! Port interface for sales and stove-ID records

use async_trait::async_trait;
use partnerhub_domain::{
    ApiResponse, ExportFormat, ExportPayload, PageRequest, Result, Sale, SaleInput, SalesFilters,
    StoveIdFilters, StoveRecord,
};

use crate::scope::RequestScope;

/// Remote store of sales transactions
#[async_trait]
pub trait SalesPort: Send + Sync {
    /// Filtered, sorted and paginated sales listing
    async fn list_advanced(
        &self,
        filters: &SalesFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Sale>>;

    async fn get(&self, id: &str, scope: &RequestScope) -> Result<Sale>;

    async fn create(&self, input: &SaleInput, scope: &RequestScope) -> Result<Sale>;

    /// Export every sale matching `filters` in the requested format
    ///
    /// The payload is the raw file body, not a JSON envelope.
    async fn export(
        &self,
        filters: &SalesFilters,
        format: ExportFormat,
        scope: &RequestScope,
    ) -> Result<ExportPayload>;

    async fn list_stove_ids(
        &self,
        filters: &StoveIdFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<StoveRecord>>;
}
