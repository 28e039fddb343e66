//! `/organizations` client

use async_trait::async_trait;
use partnerhub_core::{OrganizationsPort, RequestScope};
use partnerhub_domain::{
    ApiResponse, Organization, OrganizationFilters, OrganizationInput, PageRequest, Result,
};
use reqwest::Method;
use tracing::{info, instrument};

use super::client::{to_body, ApiClient};
use super::normalize::{normalize_item, normalize_list};
use super::query::QueryParams;

const RESOURCE: &str = "organizations";

pub struct OrganizationsClient {
    api: ApiClient,
}

impl OrganizationsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrganizationsPort for OrganizationsClient {
    #[instrument(skip(self, filters, scope), fields(page = page.page, limit = page.limit))]
    async fn list(
        &self,
        filters: &OrganizationFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Organization>> {
        let query = QueryParams::from_filters(filters)?.with_page(page);
        let url = self.api.endpoint_with_query(&[RESOURCE], &query)?;
        normalize_list(self.api.get_json(url, scope).await?)
    }

    async fn get(&self, id: &str, scope: &RequestScope) -> Result<Organization> {
        let url = self.api.endpoint(&[RESOURCE, id])?;
        self.api.get_item(url, scope).await
    }

    #[instrument(skip(self, input, scope))]
    async fn create(&self, input: &OrganizationInput, scope: &RequestScope) -> Result<Organization> {
        let url = self.api.endpoint(&[RESOURCE])?;
        let body = self.api.send_json(Method::POST, url, to_body(input)?, scope).await?;
        let created: Organization = normalize_item(body)?;
        info!(organization_id = %created.id, "organization created");
        Ok(created)
    }

    #[instrument(skip(self, input, scope))]
    async fn update(
        &self,
        id: &str,
        input: &OrganizationInput,
        scope: &RequestScope,
    ) -> Result<Organization> {
        let url = self.api.endpoint(&[RESOURCE, id])?;
        let body = self.api.send_json(Method::PUT, url, to_body(input)?, scope).await?;
        normalize_item(body)
    }

    #[instrument(skip(self, scope))]
    async fn delete(&self, id: &str, scope: &RequestScope) -> Result<()> {
        let url = self.api.endpoint(&[RESOURCE, id])?;
        self.api.delete(url, scope).await?;
        info!(organization_id = id, "organization deleted");
        Ok(())
    }
}
