//! CSV bulk import of partner organizations
//!
//! - [`parser`]: file checks and single-pass content validation
//! - [`template`]: the downloadable template (accepted by the parser)
//! - [`service`]: validate-then-upload workflow over [`CsvImportPort`]

pub mod parser;
pub mod ports;
pub mod service;
pub mod template;

pub use parser::{
    codes, parse_import, validate_file, ParsedImport, MAX_FILE_BYTES, PARTNER_ID_HEADER,
    REQUIRED_HEADERS,
};
pub use ports::CsvImportPort;
pub use service::{ImportError, ImportService};
pub use template::generate_template;
