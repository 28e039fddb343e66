//! Sales analytics: state heatmap and dashboard totals

pub mod heatmap;
pub mod service;

pub use heatmap::{sales_totals, state_heatmap, UNKNOWN_STATE};
pub use service::SalesAnalytics;
