//! Adapters between host-provided services and the generic runtime pieces.

pub mod session_store;

pub use session_store::SharedSessionStore;
