//! Partner organizations

pub mod ports;

pub use ports::OrganizationsPort;
