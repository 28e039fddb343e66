//! Local validation of organization import files
//!
//! Everything here runs before upload. Violations are collected in one pass
//! so the user sees the complete list instead of fixing one error per
//! round-trip.

use std::collections::HashMap;
use std::path::Path;

use partnerhub_common::validation::{ValidationError, ValidationResult};
use partnerhub_domain::constants::{
    CSV_FILE_EXTENSION, CSV_MAX_FILE_BYTES, CSV_PARTNER_ID_HEADER, CSV_REQUIRED_HEADERS,
};
use partnerhub_domain::ImportRow;
use tracing::debug;

pub const REQUIRED_HEADERS: [&str; 16] = CSV_REQUIRED_HEADERS;
pub const MAX_FILE_BYTES: u64 = CSV_MAX_FILE_BYTES;
pub const PARTNER_ID_HEADER: &str = CSV_PARTNER_ID_HEADER;

/// Error codes attached to every reported violation
pub mod codes {
    pub const INVALID_EXTENSION: &str = "invalid_extension";
    pub const FILE_TOO_LARGE: &str = "file_too_large";
    pub const INVALID_FILE: &str = "invalid_file";
    pub const EMPTY_FILE: &str = "empty_file";
    pub const MISSING_HEADER: &str = "missing_header";
    pub const MISSING_PARTNER_ID: &str = "missing_partner_id";
    pub const DUPLICATE_PARTNER_ID: &str = "duplicate_partner_id";
}

/// Rows accepted for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    pub headers: Vec<String>,
    pub rows: Vec<ImportRow>,
}

impl ParsedImport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Check the file name and size before reading the content
pub fn validate_file(name: &str, size: u64) -> ValidationResult<()> {
    let mut errors = ValidationError::new();

    let is_csv = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_FILE_EXTENSION));
    if !is_csv {
        errors.add_error_with_code("file", "Please select a CSV file", codes::INVALID_EXTENSION);
    }

    if size > MAX_FILE_BYTES {
        errors.add_error_with_code(
            "file",
            format!("File size must be at most {} MB", MAX_FILE_BYTES / (1024 * 1024)),
            codes::FILE_TOO_LARGE,
        );
    }

    errors.into_result(())
}

/// Parse `content` into upload rows, or report every rule it breaks
///
/// Headers and cells are trimmed and rows whose cells are all blank are
/// skipped. Row numbers in messages are 1-based file line numbers.
pub fn parse_import(content: &str) -> ValidationResult<ParsedImport> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut errors = ValidationError::new();
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut partner_lines: Vec<(String, Vec<u64>)> = Vec::new();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                errors.add_error_with_code(
                    "file",
                    format!("Could not read CSV: {err}"),
                    codes::INVALID_FILE,
                );
                return Err(errors);
            }
        };
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);

        let Some(header_row) = headers.as_ref() else {
            let header_row: Vec<String> = record.iter().map(str::to_string).collect();
            for required in REQUIRED_HEADERS {
                if !header_row.iter().any(|h| h == required) {
                    errors.add_error_with_code(
                        "headers",
                        format!("Missing required column: {required}"),
                        codes::MISSING_HEADER,
                    );
                }
            }
            headers = Some(header_row);
            continue;
        };

        let mut row = ImportRow::new();
        for (index, header) in header_row.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            row.insert(header.clone(), record.get(index).unwrap_or_default().to_string());
        }

        if header_row.iter().any(|h| h == PARTNER_ID_HEADER) {
            match row.get(PARTNER_ID_HEADER).filter(|id| !id.is_empty()) {
                None => errors.add_error_with_code(
                    format!("row {line}"),
                    format!("Row {line}: Partner ID is required"),
                    codes::MISSING_PARTNER_ID,
                ),
                Some(id) => match seen.get(id) {
                    Some(&slot) => partner_lines[slot].1.push(line),
                    None => {
                        seen.insert(id.clone(), partner_lines.len());
                        partner_lines.push((id.clone(), vec![line]));
                    }
                },
            }
        }

        rows.push(row);
    }

    for (id, lines) in partner_lines.iter().filter(|(_, lines)| lines.len() > 1) {
        let lines: Vec<String> = lines.iter().map(u64::to_string).collect();
        errors.add_error_with_code(
            PARTNER_ID_HEADER,
            format!("Duplicate Partner ID \"{id}\" on rows {}", lines.join(", ")),
            codes::DUPLICATE_PARTNER_ID,
        );
    }

    let Some(headers) = headers else {
        errors.add_error_with_code("file", "The file is empty", codes::EMPTY_FILE);
        return Err(errors);
    };
    if rows.is_empty() && errors.is_empty() {
        errors.add_error_with_code("file", "The file has no data rows", codes::EMPTY_FILE);
    }

    debug!(rows = rows.len(), violations = errors.error_count(), "parsed import file");
    errors.into_result(ParsedImport { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_line() -> String {
        REQUIRED_HEADERS.join(",")
    }

    fn data_line(partner_id: &str) -> String {
        REQUIRED_HEADERS
            .iter()
            .map(|h| if *h == PARTNER_ID_HEADER { partner_id.to_string() } else { "x".into() })
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn test_validate_file_accepts_uppercase_extension() {
        assert!(validate_file("partners.CSV", 1024).is_ok());
    }

    #[test]
    fn test_validate_file_reports_extension_and_size() {
        let err = validate_file("partners.xlsx", MAX_FILE_BYTES + 1).unwrap_err();
        assert_eq!(err.errors_with_code(codes::INVALID_EXTENSION).len(), 1);
        assert_eq!(err.errors_with_code(codes::FILE_TOO_LARGE).len(), 1);
    }

    #[test]
    fn test_validate_file_allows_exact_limit() {
        assert!(validate_file("a.csv", MAX_FILE_BYTES).is_ok());
    }

    #[test]
    fn test_parse_trims_and_skips_blank_rows() {
        let content = format!(
            "{}\n{}\n,,,,\n\n{}\n",
            header_line(),
            data_line("  P-1  "),
            data_line("P-2")
        );
        let parsed = parse_import(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.rows[0][PARTNER_ID_HEADER], "P-1");
    }

    #[test]
    fn test_parse_strips_byte_order_mark() {
        let content = format!("\u{feff}{}\n{}\n", header_line(), data_line("P-1"));
        assert!(parse_import(&content).is_ok());
    }

    #[test]
    fn test_missing_headers_are_each_reported() {
        let headers: Vec<&str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|h| *h != "Partner Email" && *h != "Branch")
            .collect();
        let content = format!("{}\n", headers.join(","));
        let err = parse_import(&content).unwrap_err();
        assert_eq!(err.errors_with_code(codes::MISSING_HEADER).len(), 2);
    }

    #[test]
    fn test_empty_content_is_rejected() {
        let err = parse_import("   \n").unwrap_err();
        assert_eq!(err.errors_with_code(codes::EMPTY_FILE).len(), 1);
    }

    #[test]
    fn test_header_only_file_is_rejected() {
        let err = parse_import(&format!("{}\n", header_line())).unwrap_err();
        assert_eq!(err.errors_with_code(codes::EMPTY_FILE).len(), 1);
    }

    #[test]
    fn test_duplicate_reported_once_with_every_line() {
        let content = format!(
            "{}\n{}\n{}\n{}\n",
            header_line(),
            data_line("P-1"),
            data_line("P-1"),
            data_line("P-1")
        );
        let err = parse_import(&content).unwrap_err();
        let dups = err.errors_with_code(codes::DUPLICATE_PARTNER_ID);
        assert_eq!(dups.len(), 1);
        assert!(dups[0].message.contains("rows 2, 3, 4"));
    }
}
