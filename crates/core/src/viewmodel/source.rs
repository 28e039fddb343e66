//! Data sources a list view can page through

use std::sync::Arc;

use async_trait::async_trait;
use partnerhub_domain::constants::{COMPONENT_AGENTS, COMPONENT_ORGANIZATIONS, COMPONENT_SALES};
use partnerhub_domain::{
    Agent, AgentFilters, ApiResponse, Organization, OrganizationFilters, PageRequest, Result, Sale,
    SalesFilters,
};

use crate::agents::AgentsPort;
use crate::organizations::OrganizationsPort;
use crate::sales::SalesPort;
use crate::scope::RequestScope;

/// One paginated, filterable listing
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;
    type Filters: Clone + Default + Send + Sync + 'static;

    /// Component name used to tag tracked requests
    fn component(&self) -> &'static str;

    async fn fetch(
        &self,
        filters: &Self::Filters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Self::Item>>;
}

pub struct OrganizationsSource {
    port: Arc<dyn OrganizationsPort>,
}

impl OrganizationsSource {
    pub fn new(port: Arc<dyn OrganizationsPort>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl ListSource for OrganizationsSource {
    type Item = Organization;
    type Filters = OrganizationFilters;

    fn component(&self) -> &'static str {
        COMPONENT_ORGANIZATIONS
    }

    async fn fetch(
        &self,
        filters: &OrganizationFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Organization>> {
        self.port.list(filters, page, scope).await
    }
}

pub struct SalesSource {
    port: Arc<dyn SalesPort>,
}

impl SalesSource {
    pub fn new(port: Arc<dyn SalesPort>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl ListSource for SalesSource {
    type Item = Sale;
    type Filters = SalesFilters;

    fn component(&self) -> &'static str {
        COMPONENT_SALES
    }

    async fn fetch(
        &self,
        filters: &SalesFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Sale>> {
        self.port.list_advanced(filters, page, scope).await
    }
}

pub struct AgentsSource {
    port: Arc<dyn AgentsPort>,
}

impl AgentsSource {
    pub fn new(port: Arc<dyn AgentsPort>) -> Self {
        Self { port }
    }
}

#[async_trait]
impl ListSource for AgentsSource {
    type Item = Agent;
    type Filters = AgentFilters;

    fn component(&self) -> &'static str {
        COMPONENT_AGENTS
    }

    async fn fetch(
        &self,
        filters: &AgentFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Agent>> {
        self.port.list(filters, page, scope).await
    }
}
