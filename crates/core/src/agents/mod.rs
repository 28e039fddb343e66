//! Field agent approval workflow

pub mod ports;

pub use ports::AgentsPort;
