//! Port interface for the bulk-import endpoint

use async_trait::async_trait;
use partnerhub_domain::{ImportRow, ImportSummary, Result};

use crate::scope::RequestScope;

#[async_trait]
pub trait CsvImportPort: Send + Sync {
    /// Upload rows that already passed local validation
    async fn upload(&self, rows: &[ImportRow], scope: &RequestScope) -> Result<ImportSummary>;
}
