//! Downloadable import template

use partnerhub_domain::{PartnerHubError, Result};

use super::parser::REQUIRED_HEADERS;

const EXAMPLE_ROW: [&str; 16] = [
    "SR-0001",
    "2024-01-15",
    "Jane Doe",
    "Lagos",
    "Ikeja",
    "2",
    "admin@example.com",
    "STV-0001;STV-0002",
    "Factory A",
    "John Smith",
    "PARTNER-001",
    "12 Allen Avenue, Ikeja",
    "Ada Obi",
    "08012345678",
    "08098765432",
    "partner@example.com",
];

/// Header row followed by one filled-in example row
pub fn generate_template() -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REQUIRED_HEADERS).map_err(template_error)?;
    writer.write_record(EXAMPLE_ROW).map_err(template_error)?;
    let bytes = writer.into_inner().map_err(template_error)?;
    String::from_utf8(bytes).map_err(|e| PartnerHubError::Internal(e.to_string()))
}

fn template_error(err: impl std::fmt::Display) -> PartnerHubError {
    PartnerHubError::Internal(format!("failed to write import template: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parser::{parse_import, PARTNER_ID_HEADER};

    #[test]
    fn test_template_passes_own_validation() {
        let template = generate_template().unwrap();
        let parsed = parse_import(&template).unwrap();
        assert_eq!(parsed.headers, REQUIRED_HEADERS.map(String::from).to_vec());
        assert_eq!(parsed.rows[0][PARTNER_ID_HEADER], "PARTNER-001");
    }

    #[test]
    fn test_example_row_quotes_embedded_commas() {
        let template = generate_template().unwrap();
        assert!(template.contains("\"12 Allen Avenue, Ikeja\""));
    }
}
