//! Observable state of a list view

use partnerhub_domain::{ErrorCategory, PageInfo, PageRequest, PartnerHubError};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPhase {
    Idle,
    /// First load; the table has nothing to show yet
    Loading,
    Success,
    Error,
}

/// Error as shown by the view, already classified
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewError {
    pub category: ErrorCategory,
    pub message: String,
}

impl From<&PartnerHubError> for ViewError {
    fn from(err: &PartnerHubError) -> Self {
        Self { category: err.category(), message: err.user_message() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState<T, F> {
    pub phase: ViewPhase,
    /// Lighter indicator for refetches that keep the current rows visible
    pub table_loading: bool,
    pub data: Vec<T>,
    pub page: PageInfo,
    /// Page the next fetch asks for
    pub request: PageRequest,
    pub filters: F,
    pub error: Option<ViewError>,
    /// Bumped on every published change
    pub version: u64,
}

impl<T, F: Default> ViewState<T, F> {
    pub fn new(page_size: u32) -> Self {
        Self {
            phase: ViewPhase::Idle,
            table_loading: false,
            data: Vec::new(),
            page: PageInfo::default(),
            request: PageRequest::new(1, page_size),
            filters: F::default(),
            error: None,
            version: 0,
        }
    }
}

impl<T, F> ViewState<T, F> {
    pub fn is_loading(&self) -> bool {
        self.phase == ViewPhase::Loading || self.table_loading
    }
}

/// What happened to one fetch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows and pagination were applied
    Loaded,
    /// A user-visible error was applied
    Failed(ViewError),
    /// Cancelled by timeout, tracker or unmount; no error was shown
    Cancelled,
    /// Another fetch of this view was still outstanding
    Dropped,
    /// A newer filter change replaced this one during the debounce window
    Superseded,
    /// The view is unmounted or the user is not signed in
    Skipped,
}
