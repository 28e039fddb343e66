//! In-flight request tracking and bulk cancellation

pub mod tracker;

pub use tracker::{RequestTicket, RequestTracker, TrackedRequestInfo, TrackingGuard};
