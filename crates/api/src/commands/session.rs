//! Session commands
//!
//! Sign-in itself happens in the host's auth flow; these commands hand the
//! resulting session to the token manager and tear it down again.

use partnerhub_common::auth::Session;
use partnerhub_domain::Result;
use partnerhub_infra::to_domain;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::required;
use crate::context::AppContext;
use crate::utils::execute_command;

/// Session handed over by the host after a successful sign-in
#[derive(Clone, Deserialize)]
pub struct SessionGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires
    pub expires_in: i64,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
}

pub async fn sign_in_with_session(ctx: &AppContext, grant: SessionGrant) -> Result<SessionStatus> {
    execute_command("session::sign_in", || async {
        let access_token = required("access token", &grant.access_token)?.to_string();
        let mut session =
            Session::new(access_token, grant.refresh_token.clone(), grant.expires_in);
        if let Some(user_id) = &grant.user_id {
            session = session.with_user_id(user_id.clone());
        }

        ctx.tokens.store_session(session).await.map_err(to_domain)?;
        info!(user_id = grant.user_id.as_deref(), "signed in");
        Ok(session_status(ctx).await)
    })
    .await
}

/// Cancel everything in flight, then drop the session
pub async fn sign_out(ctx: &AppContext) -> Result<()> {
    execute_command("session::sign_out", || async {
        ctx.cancel_in_flight();
        ctx.tokens.clear_session().await.map_err(to_domain)?;
        info!("signed out");
        Ok(())
    })
    .await
}

pub async fn session_status(ctx: &AppContext) -> SessionStatus {
    SessionStatus {
        authenticated: ctx.tokens.is_authenticated().await,
        expires_in_seconds: ctx.tokens.seconds_until_expiry().await,
    }
}
