//! # PartnerHub Core
//!
//! Client-side business logic - no HTTP or storage code.
//!
//! This crate contains:
//! - Port interfaces (traits) for the remote organization, sales, agent and
//!   import endpoints
//! - CSV import validation and the import template
//! - Sales analytics (state heatmap, totals)
//! - The list view-model state machine
//!
//! ## Architecture Principles
//! - Only depends on `partnerhub-domain` and `partnerhub-common`
//! - All remote calls go through ports, cancelled via [`RequestScope`]
//! - Pure, testable logic

pub mod agents;
pub mod analytics;
pub mod import;
pub mod organizations;
pub mod sales;
pub mod scope;
pub mod viewmodel;

// Re-export specific items to avoid ambiguity
pub use agents::AgentsPort;
pub use analytics::SalesAnalytics;
pub use import::{CsvImportPort, ImportError, ImportService};
pub use organizations::OrganizationsPort;
pub use sales::SalesPort;
pub use scope::RequestScope;
pub use viewmodel::{
    AgentsSource, FetchOutcome, ListSource, ListViewModel, OrganizationsSource, SalesSource,
    ViewError, ViewOptions, ViewPhase, ViewState,
};
