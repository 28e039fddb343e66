//! CSV bulk import commands

use partnerhub_core::import::generate_template;
use partnerhub_domain::constants::COMPONENT_CSV_IMPORT;
use partnerhub_domain::{ImportSummary, Result};

use crate::context::AppContext;
use crate::utils::execute_command;

/// Validate `bytes` locally and upload the rows.
///
/// A file that fails local validation is rejected with every violation in
/// one `Validation` error and nothing is uploaded.
pub async fn import_organizations_csv(
    ctx: &AppContext,
    file_name: &str,
    bytes: &[u8],
) -> Result<ImportSummary> {
    execute_command("import::organizations_csv", || async {
        let scope = ctx.scope(COMPONENT_CSV_IMPORT);
        Ok(ctx.import.import_file(file_name, bytes, &scope).await?)
    })
    .await
}

/// Template CSV offered for download
pub async fn csv_template() -> Result<String> {
    execute_command("import::csv_template", || async { generate_template() }).await
}
