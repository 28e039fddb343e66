//! Domain API clients
//!
//! Thin adapters over the safe-fetch client: build the endpoint URL, shape
//! the query or body, and normalize the response envelope. Each client
//! implements the matching `partnerhub-core` port.

pub mod agents;
pub mod client;
pub mod csv_import;
pub mod normalize;
pub mod organizations;
pub mod query;
pub mod sales;

pub use agents::AgentsClient;
pub use client::ApiClient;
pub use csv_import::CsvImportClient;
pub use normalize::{normalize_item, normalize_list};
pub use organizations::OrganizationsClient;
pub use query::QueryParams;
pub use sales::SalesClient;
