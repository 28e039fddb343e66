//! Field agents awaiting approval

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval status of an agent registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Pending,
    Approved,
    Rejected,
}

impl AgentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    pub status: AgentStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Body of an approve/reject call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum AgentDecision {
    Approve,
    Reject { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<Agent, _> = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "full_name": "Ada",
            "status": "suspended"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_decision_shape() {
        let json =
            serde_json::to_value(AgentDecision::Reject { reason: "duplicate".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"decision": "reject", "reason": "duplicate"}));
    }
}
