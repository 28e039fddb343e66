//! Scriptable [`ListSource`] over organizations

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use partnerhub_common::tracking::RequestTracker;
use partnerhub_core::{ListSource, RequestScope};
use partnerhub_domain::{
    ApiResponse, CancelReason, Organization, OrganizationFilters, PageRequest, PartnerHubError,
    Result,
};
use tokio::sync::Notify;

/// Lets a test hold a fetch open until it decides to release it
#[derive(Default)]
pub struct Gate {
    pub started: Notify,
    pub release: Notify,
}

pub struct ScriptedSource {
    component: &'static str,
    responses: Mutex<VecDeque<Result<ApiResponse<Organization>>>>,
    calls: Arc<Mutex<Vec<(OrganizationFilters, PageRequest)>>>,
    gate: Option<Arc<Gate>>,
    tracker: Option<Arc<RequestTracker>>,
}

impl ScriptedSource {
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            responses: Mutex::new(VecDeque::new()),
            calls: Arc::new(Mutex::new(Vec::new())),
            gate: None,
            tracker: None,
        }
    }

    /// Queue the result of the next fetch
    pub fn respond(self, result: Result<ApiResponse<Organization>>) -> Self {
        self.responses.lock().push_back(result);
        self
    }

    /// Hold every fetch until the gate is released
    pub fn gated(mut self) -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Register every fetch with `tracker` the way the HTTP client does
    pub fn tracked(mut self, tracker: Arc<RequestTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Recorded `(filters, page)` pairs, shared with the source
    pub fn calls(&self) -> Arc<Mutex<Vec<(OrganizationFilters, PageRequest)>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ListSource for ScriptedSource {
    type Item = Organization;
    type Filters = OrganizationFilters;

    fn component(&self) -> &'static str {
        self.component
    }

    async fn fetch(
        &self,
        filters: &OrganizationFilters,
        page: PageRequest,
        scope: &RequestScope,
    ) -> Result<ApiResponse<Organization>> {
        self.calls.lock().push((filters.clone(), page));

        let token = scope.token().child_token();
        let _guard = self.tracker.as_ref().map(|tracker| {
            tracker.track(
                format!("GET /organizations?offset={}", page.offset()),
                token.clone(),
                scope.component().to_string(),
                "/organizations",
            )
        });

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            tokio::select! {
                () = token.cancelled() => {
                    return Err(PartnerHubError::Cancelled(CancelReason::Aborted));
                }
                () = gate.release.notified() => {}
            }
        }

        self.responses.lock().pop_front().unwrap_or_else(|| Ok(ApiResponse::ok(Vec::new(), None)))
    }
}
