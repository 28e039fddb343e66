//! Agent approval workflow

use partnerhub_domain::constants::COMPONENT_AGENTS;
use partnerhub_domain::{Agent, AgentDecision, AgentFilters, Page, PageRequest, Result};

use super::required;
use crate::context::AppContext;
use crate::utils::execute_command;

pub async fn list_agents(
    ctx: &AppContext,
    filters: AgentFilters,
    page: PageRequest,
) -> Result<Page<Agent>> {
    execute_command("agents::list", || async {
        let scope = ctx.scope(COMPONENT_AGENTS);
        let response = ctx.agents.list(&filters, page, &scope).await?;
        Ok(Page::from_response(response, &page))
    })
    .await
}

pub async fn approve_agent(ctx: &AppContext, id: &str) -> Result<Agent> {
    execute_command("agents::approve", || async {
        let id = required("agent id", id)?;
        ctx.agents.decide(id, &AgentDecision::Approve, &ctx.scope(COMPONENT_AGENTS)).await
    })
    .await
}

/// Reject a pending agent; `reason` is shown to the agent and must not be
/// blank
pub async fn reject_agent(ctx: &AppContext, id: &str, reason: &str) -> Result<Agent> {
    execute_command("agents::reject", || async {
        let id = required("agent id", id)?;
        let reason = required("rejection reason", reason)?;
        let decision = AgentDecision::Reject { reason: reason.to_string() };
        ctx.agents.decide(id, &decision, &ctx.scope(COMPONENT_AGENTS)).await
    })
    .await
}
