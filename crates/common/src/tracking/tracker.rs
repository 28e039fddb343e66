//! Registry of in-flight requests
//!
//! Each entry pairs a request with the cancellation token bound to its
//! network future, so owners can abort everything they started (on view
//! teardown) and stragglers can be swept (after the host suspended
//! network callbacks).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Handle returned by [`RequestTracker::register`]
///
/// Identifies one registration; two overlapping requests with the same id
/// get distinct tickets.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    seq: u64,
    id: String,
}

impl RequestTicket {
    /// Request id the ticket was registered under
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
struct TrackedRequest {
    id: String,
    component: String,
    url: String,
    started_at: Instant,
    cancel: CancellationToken,
}

/// Diagnostic view of a tracked request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRequestInfo {
    pub id: String,
    pub component: String,
    pub url: String,
    pub age: Duration,
}

/// In-memory request registry
///
/// Owned and injected (typically as `Arc<RequestTracker>`), never global, so
/// each test can use its own instance.
#[derive(Debug, Default)]
pub struct RequestTracker {
    entries: Mutex<HashMap<u64, TrackedRequest>>,
    next_seq: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request that has started
    pub fn register(
        &self,
        id: impl Into<String>,
        cancel: CancellationToken,
        component: impl Into<String>,
        url: impl Into<String>,
    ) -> RequestTicket {
        let id = id.into();
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let entry = TrackedRequest {
            id: id.clone(),
            component: component.into(),
            url: url.into(),
            started_at: Instant::now(),
            cancel,
        };
        debug!(request_id = %entry.id, component = %entry.component, "tracking request");
        self.entries.lock().insert(seq, entry);
        RequestTicket { seq, id }
    }

    /// Drop the bookkeeping for a finished request
    ///
    /// Does not cancel; unregistering an already-removed ticket is a no-op.
    pub fn unregister(&self, ticket: &RequestTicket) {
        self.entries.lock().remove(&ticket.seq);
    }

    /// Register and return a guard that unregisters when dropped
    pub fn track(
        self: &Arc<Self>,
        id: impl Into<String>,
        cancel: CancellationToken,
        component: impl Into<String>,
        url: impl Into<String>,
    ) -> TrackingGuard {
        let ticket = self.register(id, cancel, component, url);
        TrackingGuard { tracker: Arc::clone(self), ticket: Some(ticket) }
    }

    /// Cancel and remove every request started by `component`
    ///
    /// # Returns
    /// Number of requests cancelled
    pub fn cancel_all(&self, component: &str) -> usize {
        let cancelled = self.cancel_where(|entry| entry.component == component);
        if cancelled > 0 {
            info!(component, cancelled, "cancelled in-flight requests for component");
        }
        cancelled
    }

    /// Cancel and remove every registration carrying `id`
    pub fn cancel(&self, id: &str) -> usize {
        self.cancel_where(|entry| entry.id == id)
    }

    /// Cancel and remove requests that have been running longer than
    /// `max_age`; younger requests are left alone
    pub fn prune_stale(&self, max_age: Duration) -> usize {
        let now = Instant::now();
        let pruned =
            self.cancel_where(|entry| now.saturating_duration_since(entry.started_at) > max_age);
        if pruned > 0 {
            info!(pruned, max_age_ms = max_age.as_millis() as u64, "pruned stale requests");
        }
        pruned
    }

    /// Number of tracked requests for `component`
    pub fn in_flight(&self, component: &str) -> usize {
        self.entries.lock().values().filter(|entry| entry.component == component).count()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Snapshot for diagnostics, oldest first
    pub fn snapshot(&self) -> Vec<TrackedRequestInfo> {
        let now = Instant::now();
        let mut infos: Vec<TrackedRequestInfo> = self
            .entries
            .lock()
            .values()
            .map(|entry| TrackedRequestInfo {
                id: entry.id.clone(),
                component: entry.component.clone(),
                url: entry.url.clone(),
                age: now.saturating_duration_since(entry.started_at),
            })
            .collect();
        infos.sort_by(|a, b| b.age.cmp(&a.age));
        infos
    }

    fn cancel_where(&self, predicate: impl Fn(&TrackedRequest) -> bool) -> usize {
        let removed: Vec<TrackedRequest> = {
            let mut entries = self.entries.lock();
            let seqs: Vec<u64> = entries
                .iter()
                .filter(|(_, entry)| predicate(entry))
                .map(|(seq, _)| *seq)
                .collect();
            seqs.into_iter().filter_map(|seq| entries.remove(&seq)).collect()
        };

        // cancel outside the lock: cancellation wakes futures that may
        // unregister themselves
        for entry in &removed {
            debug!(request_id = %entry.id, component = %entry.component, "cancelling request");
            entry.cancel.cancel();
        }
        removed.len()
    }
}

/// Unregisters its request when dropped, whatever the outcome
#[derive(Debug)]
pub struct TrackingGuard {
    tracker: Arc<RequestTracker>,
    ticket: Option<RequestTicket>,
}

impl TrackingGuard {
    pub fn ticket(&self) -> Option<&RequestTicket> {
        self.ticket.as_ref()
    }
}

impl Drop for TrackingGuard {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            self.tracker.unregister(&ticket);
        }
    }
}
