//! Import workflow: validate locally, then upload

use std::sync::Arc;

use partnerhub_common::validation::ValidationError;
use partnerhub_domain::{ImportSummary, PartnerHubError};
use thiserror::Error;
use tracing::{info, warn};

use super::parser::{parse_import, validate_file, ParsedImport};
use super::ports::CsvImportPort;
use crate::scope::RequestScope;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The file broke local rules; nothing was uploaded
    #[error("{0}")]
    Rejected(ValidationError),

    #[error(transparent)]
    Upload(#[from] PartnerHubError),
}

impl ImportError {
    /// Every local violation, empty for upload failures
    pub fn violations(&self) -> &[partnerhub_common::validation::FieldError] {
        match self {
            Self::Rejected(err) => &err.errors,
            Self::Upload(_) => &[],
        }
    }
}

impl From<ImportError> for PartnerHubError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Rejected(validation) => {
                PartnerHubError::Validation(validation.messages().join("\n"))
            }
            ImportError::Upload(err) => err,
        }
    }
}

pub struct ImportService {
    port: Arc<dyn CsvImportPort>,
}

impl ImportService {
    pub fn new(port: Arc<dyn CsvImportPort>) -> Self {
        Self { port }
    }

    /// Validate name, size and content of an uploaded file, without any
    /// network call
    pub fn validate(&self, file_name: &str, bytes: &[u8]) -> Result<ParsedImport, ImportError> {
        let mut errors = ValidationError::new();
        if let Err(file_errors) = validate_file(file_name, bytes.len() as u64) {
            errors.merge(file_errors);
            return Err(ImportError::Rejected(errors));
        }

        let content = match std::str::from_utf8(bytes) {
            Ok(content) => content,
            Err(_) => {
                errors.add_error_with_code(
                    "file",
                    "The file is not valid UTF-8 text",
                    super::parser::codes::INVALID_FILE,
                );
                return Err(ImportError::Rejected(errors));
            }
        };

        parse_import(content).map_err(ImportError::Rejected)
    }

    /// Validate and upload; rejected files never reach the network
    pub async fn import_file(
        &self,
        file_name: &str,
        bytes: &[u8],
        scope: &RequestScope,
    ) -> Result<ImportSummary, ImportError> {
        let parsed = match self.validate(file_name, bytes) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    file_name,
                    violations = err.violations().len(),
                    "import rejected by local validation"
                );
                return Err(err);
            }
        };

        let summary = self.port.upload(&parsed.rows, scope).await?;
        info!(
            file_name,
            total_rows = summary.summary.total_rows,
            created = summary.summary.organizations_created,
            updated = summary.summary.organizations_updated,
            errors = summary.summary.errors_count,
            "organization import finished"
        );
        Ok(summary)
    }
}
