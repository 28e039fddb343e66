//! Port interface for partner organization records

use async_trait::async_trait;
use partnerhub_domain::{
    ApiResponse, Organization, OrganizationFilters, OrganizationInput, PageRequest, Result,
};

use crate::scope::RequestScope;

/// Remote store of partner organizations
#[async_trait]
pub trait OrganizationsPort: Send + Sync {
    /// List one page of organizations matching `filters`
    async fn list(
        &self,
        filters: &OrganizationFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Organization>>;

    async fn get(&self, id: &str, scope: &RequestScope) -> Result<Organization>;

    async fn create(&self, input: &OrganizationInput, scope: &RequestScope)
        -> Result<Organization>;

    async fn update(
        &self,
        id: &str,
        input: &OrganizationInput,
        scope: &RequestScope,
    ) -> Result<Organization>;

    async fn delete(&self, id: &str, scope: &RequestScope) -> Result<()>;
}
