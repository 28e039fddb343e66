//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Safe-fetch defaults
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_RETRY_COUNT: u32 = 1;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 1_000;
pub const DEFAULT_STALE_REQUEST_MS: u64 = 30_000;

// Session handling
pub const DEFAULT_REFRESH_THRESHOLD_SECS: i64 = 60;

// View models
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

// CSV import
pub const CSV_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;
pub const CSV_FILE_EXTENSION: &str = "csv";
pub const CSV_PARTNER_ID_HEADER: &str = "Partner ID";

/// Columns every organization import file must carry, in template order
pub const CSV_REQUIRED_HEADERS: [&str; 16] = [
    "Sales Reference",
    "Sales Date",
    "Customer",
    "State",
    "Branch",
    "Quantity",
    "Downloaded by",
    "Stove IDs",
    "Sales Factory",
    "Sales Rep",
    "Partner ID",
    "Partner Address",
    "Partner Contact Person",
    "Partner Contact Phone",
    "Partner Alternative Phone",
    "Partner Email",
];

// Component names used for request tracking
pub const COMPONENT_ORGANIZATIONS: &str = "organizations";
pub const COMPONENT_SALES: &str = "sales";
pub const COMPONENT_AGENTS: &str = "agents";
pub const COMPONENT_CSV_IMPORT: &str = "csv_import";
pub const COMPONENT_STOVE_IDS: &str = "stove_ids";
