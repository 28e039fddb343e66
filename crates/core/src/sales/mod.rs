//! Sales transactions, exports and stove inventory

pub mod ports;

pub use ports::SalesPort;
