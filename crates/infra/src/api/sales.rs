//! `/sales-advanced`, `/sales` and `/stove-ids` client

use async_trait::async_trait;
use chrono::Utc;
use partnerhub_core::{RequestScope, SalesPort};
use partnerhub_domain::{
    ApiResponse, ExportFormat, ExportPayload, PageRequest, Result, Sale, SaleInput, SalesFilters,
    StoveIdFilters, StoveRecord,
};
use reqwest::Method;
use tracing::{info, instrument};

use super::client::{to_body, ApiClient};
use super::normalize::{normalize_item, normalize_list};
use super::query::QueryParams;

const ADVANCED: &str = "sales-advanced";
const SALES: &str = "sales";
const STOVE_IDS: &str = "stove-ids";

pub struct SalesClient {
    api: ApiClient,
}

impl SalesClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// Download name for an export taken today, e.g. `sales-export-2024-05-01.csv`
pub fn export_file_name(format: ExportFormat) -> String {
    format!("sales-export-{}.{}", Utc::now().format("%Y-%m-%d"), format.as_str())
}

#[async_trait]
impl SalesPort for SalesClient {
    #[instrument(skip(self, filters, scope), fields(page = page.page, limit = page.limit))]
    async fn list_advanced(
        &self,
        filters: &SalesFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Sale>> {
        let query = QueryParams::from_filters(filters)?.with_page(page);
        let url = self.api.endpoint_with_query(&[ADVANCED], &query)?;
        normalize_list(self.api.get_json(url, scope).await?)
    }

    async fn get(&self, id: &str, scope: &RequestScope) -> Result<Sale> {
        let url = self.api.endpoint(&[SALES, id])?;
        self.api.get_item(url, scope).await
    }

    #[instrument(skip(self, input, scope), fields(organization_id = %input.organization_id))]
    async fn create(&self, input: &SaleInput, scope: &RequestScope) -> Result<Sale> {
        let url = self.api.endpoint(&[SALES])?;
        let sale: Sale =
            normalize_item(self.api.send_json(Method::POST, url, to_body(input)?, scope).await?)?;
        info!(sale_id = %sale.id, quantity = sale.quantity, "sale recorded");
        Ok(sale)
    }

    /// Same filters as the listing plus `format`; the body is returned as-is
    #[instrument(skip(self, filters, scope), fields(format = format.as_str()))]
    async fn export(
        &self,
        filters: &SalesFilters,
        format: ExportFormat,
        scope: &RequestScope,
    ) -> Result<ExportPayload> {
        let mut query = QueryParams::from_filters(filters)?;
        query.push("format", format.as_str());
        let url = self.api.endpoint_with_query(&[ADVANCED], &query)?;

        let content = self.api.get_raw(url, scope).await?;
        info!(bytes = content.len(), "sales export downloaded");
        Ok(ExportPayload { format, file_name: export_file_name(format), content })
    }

    #[instrument(skip(self, filters, scope), fields(page = page.page, limit = page.limit))]
    async fn list_stove_ids(
        &self,
        filters: &StoveIdFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<StoveRecord>> {
        let query = QueryParams::from_filters(filters)?.with_page(page);
        let url = self.api.endpoint_with_query(&[STOVE_IDS], &query)?;
        normalize_list(self.api.get_json(url, scope).await?)
    }
}
