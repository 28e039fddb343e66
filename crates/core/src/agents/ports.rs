//! Port interface for agent records

use async_trait::async_trait;
use partnerhub_domain::{Agent, AgentDecision, AgentFilters, ApiResponse, PageRequest, Result};

use crate::scope::RequestScope;

#[async_trait]
pub trait AgentsPort: Send + Sync {
    async fn list(
        &self,
        filters: &AgentFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Agent>>;

    /// Approve or reject a pending agent, returning the updated record
    async fn decide(
        &self,
        id: &str,
        decision: &AgentDecision,
        scope: &RequestScope,
    ) -> Result<Agent>;
}
