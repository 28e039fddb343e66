//! List view model: pagination, filters and loading state for one view
//!
//! Every view owns a root [`RequestScope`]. Each fetch runs in a child of
//! that scope and races the root's cancellation in `select!`, so once
//! [`ListViewModel::unmount`] returns no later result can reach the state.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use partnerhub_common::tracking::RequestTracker;
use partnerhub_domain::constants::{
    DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE, DEFAULT_STALE_REQUEST_MS, MAX_PAGE_SIZE,
};
use partnerhub_domain::{CancelReason, Config, PageInfo, PageRequest, PartnerHubError};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::source::ListSource;
use super::state::{FetchOutcome, ViewError, ViewPhase, ViewState};
use crate::scope::RequestScope;

/// Timing knobs of a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Quiet period before a filter change is fetched
    pub debounce: Duration,
    pub page_size: u32,
    /// Tracked requests older than this are pruned when the view becomes
    /// visible again
    pub stale_after: Duration,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.views.debounce(),
            page_size: config.views.page_size.clamp(1, MAX_PAGE_SIZE),
            stale_after: config.fetch.stale_request_age(),
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            page_size: DEFAULT_PAGE_SIZE,
            stale_after: Duration::from_millis(DEFAULT_STALE_REQUEST_MS),
        }
    }
}

pub type ListState<S> = ViewState<<S as ListSource>::Item, <S as ListSource>::Filters>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    /// Full-page loading indicator
    Initial,
    /// Table-only indicator, current rows stay visible
    Table,
}

/// Data-fetching state machine for one list view
///
/// At most one fetch is outstanding per instance. A fetch requested while
/// another is running is dropped, not queued, and the running fetch's
/// result is the one applied. Debounced filter changes are the exception:
/// they wait for the running fetch to finish and then fetch once.
pub struct ListViewModel<S: ListSource> {
    inner: Arc<Inner<S>>,
}

impl<S: ListSource> Clone for ListViewModel<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

struct Inner<S: ListSource> {
    source: S,
    tracker: Arc<RequestTracker>,
    scope: RequestScope,
    state: watch::Sender<ListState<S>>,
    in_flight: AtomicBool,
    /// Signalled whenever a fetch finishes
    idle: Notify,
    hidden: AtomicBool,
    hidden_mid_flight: AtomicBool,
    filter_generation: AtomicU64,
    options: ViewOptions,
}

impl<S: ListSource> ListViewModel<S> {
    pub fn new(source: S, tracker: Arc<RequestTracker>, options: ViewOptions) -> Self {
        let scope = RequestScope::new(source.component());
        let (state, _) = watch::channel(ViewState::new(options.page_size));
        Self {
            inner: Arc::new(Inner {
                source,
                tracker,
                scope,
                state,
                in_flight: AtomicBool::new(false),
                idle: Notify::new(),
                hidden: AtomicBool::new(false),
                hidden_mid_flight: AtomicBool::new(false),
                filter_generation: AtomicU64::new(0),
                options,
            }),
        }
    }

    pub fn component(&self) -> &'static str {
        self.inner.source.component()
    }

    /// Receiver that observes every published state change
    pub fn subscribe(&self) -> watch::Receiver<ListState<S>> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ListState<S> {
        self.inner.state.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.scope.is_cancelled()
    }

    pub fn is_fetching(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    /// Initial load with default filters; does nothing for signed-out users
    pub async fn mount(&self, authenticated: bool) -> FetchOutcome {
        if !authenticated {
            debug!(component = self.component(), "not authenticated, skipping initial load");
            return FetchOutcome::Skipped;
        }
        self.inner.load(LoadMode::Initial, |_| {}).await
    }

    /// Apply `filters` after the debounce window, going back to page 1
    ///
    /// Only the last change inside the window is fetched; earlier ones
    /// resolve to [`FetchOutcome::Superseded`]. If another fetch is running
    /// when the window closes, the change is held until that fetch ends.
    pub fn update_filters(&self, filters: S::Filters) -> JoinHandle<FetchOutcome> {
        let generation = self.inner.filter_generation.fetch_add(1, Ordering::AcqRel) + 1;
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            tokio::select! {
                biased;
                () = inner.scope.token().cancelled() => FetchOutcome::Skipped,
                () = tokio::time::sleep(inner.options.debounce) => {
                    inner.apply_filters(generation, filters).await
                }
            }
        })
    }

    pub async fn set_page(&self, page: u32) -> FetchOutcome {
        self.inner
            .load(LoadMode::Table, move |state| {
                state.request = PageRequest::new(page, state.request.limit);
            })
            .await
    }

    /// Change rows per page (clamped to the server maximum) and return to
    /// page 1
    pub async fn set_page_size(&self, page_size: u32) -> FetchOutcome {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.inner
            .load(LoadMode::Table, move |state| {
                state.request = PageRequest::new(1, page_size);
            })
            .await
    }

    /// Refetch the current page with the current filters
    pub async fn refresh(&self) -> FetchOutcome {
        self.inner.load(LoadMode::Table, |_| {}).await
    }

    /// Tear the view down
    ///
    /// Cancels the view's scope and every tracked request of its component.
    /// The view model cannot be mounted again afterwards.
    ///
    /// # Returns
    /// Number of tracked requests cancelled
    pub fn unmount(&self) -> usize {
        self.inner.scope.cancel();
        let cancelled = self.inner.tracker.cancel_all(self.component());
        info!(component = self.component(), cancelled, "view unmounted");
        cancelled
    }

    /// Page visibility changed
    ///
    /// On becoming visible again, stale tracked requests are pruned and, if a
    /// fetch was running when the page was hidden, both loading indicators
    /// are cleared without refetching.
    pub fn visibility_changed(&self, visible: bool) {
        let inner = &self.inner;
        if !visible {
            inner.hidden.store(true, Ordering::Release);
            if inner.in_flight.load(Ordering::Acquire) {
                inner.hidden_mid_flight.store(true, Ordering::Release);
            }
            return;
        }

        if !inner.hidden.swap(false, Ordering::AcqRel) {
            return;
        }
        let pruned = inner.tracker.prune_stale(inner.options.stale_after);
        if pruned > 0 {
            debug!(component = self.component(), pruned, "pruned stale requests");
        }

        let was_mid_flight = inner.hidden_mid_flight.swap(false, Ordering::AcqRel);
        if was_mid_flight && self.is_mounted() && inner.state.borrow().is_loading() {
            inner.publish(|state| {
                if state.phase == ViewPhase::Loading {
                    state.phase = ViewPhase::Idle;
                }
                state.table_loading = false;
            });
        }
    }
}

impl<S: ListSource> Drop for Inner<S> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// Clears the in-flight flag however the fetch ends and wakes waiters
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
    idle: &'a Notify,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.idle.notify_waiters();
    }
}

impl<S: ListSource> Inner<S> {
    fn publish(&self, modify: impl FnOnce(&mut ListState<S>)) {
        self.state.send_modify(|state| {
            modify(state);
            state.version += 1;
        });
    }

    async fn apply_filters(&self, generation: u64, filters: S::Filters) -> FetchOutcome {
        loop {
            if self.filter_generation.load(Ordering::Acquire) != generation {
                return FetchOutcome::Superseded;
            }
            // registered before trying, so a fetch ending in between still wakes us
            let idle = self.idle.notified();
            tokio::pin!(idle);
            idle.as_mut().enable();

            let pending = filters.clone();
            let outcome = self
                .load(LoadMode::Table, move |state| {
                    state.filters = pending;
                    state.request = PageRequest::new(1, state.request.limit);
                })
                .await;
            if outcome != FetchOutcome::Dropped {
                return outcome;
            }

            debug!(component = self.source.component(), "filter change waiting for running fetch");
            tokio::select! {
                biased;
                () = self.scope.token().cancelled() => return FetchOutcome::Skipped,
                () = &mut idle => {}
            }
        }
    }

    async fn load(
        &self,
        mode: LoadMode,
        prepare: impl FnOnce(&mut ListState<S>) + Send,
    ) -> FetchOutcome {
        let component = self.source.component();
        if self.scope.is_cancelled() {
            return FetchOutcome::Skipped;
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            debug!(component, "fetch already in progress, dropping request");
            return FetchOutcome::Dropped;
        }
        let _flight = FlightGuard { flag: &self.in_flight, idle: &self.idle };

        self.publish(|state| {
            prepare(state);
            match mode {
                LoadMode::Initial => {
                    state.phase = ViewPhase::Loading;
                    state.error = None;
                }
                LoadMode::Table => state.table_loading = true,
            }
        });

        let (filters, request) = {
            let state = self.state.borrow();
            (state.filters.clone(), state.request)
        };
        let scope = self.scope.child();

        let result = tokio::select! {
            biased;
            () = self.scope.token().cancelled() => {
                debug!(component, "view unmounted while fetching");
                return FetchOutcome::Cancelled;
            }
            result = self.source.fetch(&filters, request, &scope) => result,
        };

        match result {
            Ok(response) => {
                let page = PageInfo::from_pagination(&response.pagination_or(&request));
                let rows = response.data.len();
                self.publish(|state| {
                    state.data = response.data;
                    state.page = page;
                    state.phase = ViewPhase::Success;
                    state.table_loading = false;
                    state.error = None;
                });
                debug!(component, rows, page = page.page, total = page.total, "list loaded");
                FetchOutcome::Loaded
            }
            Err(PartnerHubError::Cancelled(CancelReason::Timeout)) => {
                debug!(component, "fetch timed out");
                self.publish(|state| {
                    if state.phase == ViewPhase::Loading {
                        state.phase = ViewPhase::Idle;
                    }
                    state.table_loading = false;
                });
                FetchOutcome::Cancelled
            }
            // aborted by its owner (cancel_all, pruning): state is left as is
            Err(err) if err.is_cancelled() => {
                debug!(component, error = %err, "fetch aborted");
                FetchOutcome::Cancelled
            }
            Err(err) => {
                warn!(component, error = %err, category = err.category().label(), "list fetch failed");
                let view_error = ViewError::from(&err);
                let applied = view_error.clone();
                self.publish(move |state| {
                    state.phase = ViewPhase::Error;
                    state.table_loading = false;
                    state.error = Some(applied);
                });
                FetchOutcome::Failed(view_error)
            }
        }
    }
}
