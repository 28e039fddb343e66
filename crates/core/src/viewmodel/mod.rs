//! View-model layer the UI shell binds to
//!
//! A [`ListViewModel`] owns the pagination, filters and loading state of one
//! list page and publishes every change through a `watch` channel. Sources
//! adapt the domain ports to the generic listing contract.

pub mod model;
pub mod source;
pub mod state;

pub use model::{ListState, ListViewModel, ViewOptions};
pub use source::{AgentsSource, ListSource, OrganizationsSource, SalesSource};
pub use state::{FetchOutcome, ViewError, ViewPhase, ViewState};
