//! `/csv-import` client

use async_trait::async_trait;
use partnerhub_core::{CsvImportPort, RequestScope};
use partnerhub_domain::{ImportRow, ImportSummary, Result};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, instrument};

use super::client::ApiClient;
use super::normalize::normalize_item;

pub struct CsvImportClient {
    api: ApiClient,
}

impl CsvImportClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CsvImportPort for CsvImportClient {
    #[instrument(skip(self, rows, scope), fields(rows = rows.len()))]
    async fn upload(&self, rows: &[ImportRow], scope: &RequestScope) -> Result<ImportSummary> {
        let url = self.api.endpoint(&["csv-import"])?;
        let body = json!({ "data": rows });
        let summary: ImportSummary =
            normalize_item(self.api.send_json(Method::POST, url, body, scope).await?)?;
        debug!(
            total = summary.summary.total_rows,
            errors = summary.summary.errors_count,
            "csv import response decoded"
        );
        Ok(summary)
    }
}
