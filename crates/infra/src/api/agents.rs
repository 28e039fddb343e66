//! `/agents` client

use async_trait::async_trait;
use partnerhub_core::{AgentsPort, RequestScope};
use partnerhub_domain::{
    Agent, AgentDecision, AgentFilters, ApiResponse, PageRequest, PartnerHubError, Result,
};
use reqwest::Method;
use serde_json::json;
use tracing::{info, instrument};

use super::client::ApiClient;
use super::normalize::{normalize_item, normalize_list};
use super::query::QueryParams;

const RESOURCE: &str = "agents";

pub struct AgentsClient {
    api: ApiClient,
}

impl AgentsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AgentsPort for AgentsClient {
    #[instrument(skip(self, filters, scope), fields(status = ?filters.status))]
    async fn list(
        &self,
        filters: &AgentFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Agent>> {
        let query = QueryParams::from_filters(filters)?.with_page(page);
        let url = self.api.endpoint_with_query(&[RESOURCE], &query)?;
        normalize_list(self.api.get_json(url, scope).await?)
    }

    /// POST `/agents/{id}/approve` or `/agents/{id}/reject`
    #[instrument(skip(self, decision, scope))]
    async fn decide(
        &self,
        id: &str,
        decision: &AgentDecision,
        scope: &RequestScope,
    ) -> Result<Agent> {
        let (action, body) = match decision {
            AgentDecision::Approve => ("approve", json!({})),
            AgentDecision::Reject { reason } => {
                if reason.trim().is_empty() {
                    return Err(PartnerHubError::InvalidInput(
                        "a rejection reason is required".into(),
                    ));
                }
                ("reject", json!({ "reason": reason.trim() }))
            }
        };

        let url = self.api.endpoint(&[RESOURCE, id, action])?;
        let agent: Agent =
            normalize_item(self.api.send_json(Method::POST, url, body, scope).await?)?;
        info!(agent_id = id, action, status = agent.status.as_str(), "agent decision recorded");
        Ok(agent)
    }
}
