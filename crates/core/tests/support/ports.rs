//! In-memory port implementations

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use partnerhub_core::{CsvImportPort, RequestScope, SalesPort};
use partnerhub_domain::{
    ApiResponse, ExportFormat, ExportPayload, ImportCounts, ImportRow, ImportSummary, PageRequest,
    Pagination, PartnerHubError, Result, Sale, SaleInput, SalesFilters, StoveIdFilters,
    StoveRecord,
};

/// Import endpoint that records uploads and reports every row as created
#[derive(Default)]
pub struct RecordingImportPort {
    uploads: AtomicUsize,
    rows: Mutex<Vec<ImportRow>>,
}

impl RecordingImportPort {
    pub fn uploads(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn uploaded_rows(&self) -> Vec<ImportRow> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl CsvImportPort for RecordingImportPort {
    async fn upload(&self, rows: &[ImportRow], _scope: &RequestScope) -> Result<ImportSummary> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().extend(rows.iter().cloned());
        Ok(ImportSummary {
            summary: ImportCounts {
                total_rows: rows.len() as u64,
                organizations_created: rows.len() as u64,
                organizations_updated: 0,
                errors_count: 0,
            },
            ..ImportSummary::default()
        })
    }
}

/// Sales listing served from a fixed vector, honouring limit/offset
pub struct PagedSalesPort {
    sales: Vec<Sale>,
    max_limit: u32,
    requests: Mutex<Vec<PageRequest>>,
}

impl PagedSalesPort {
    pub fn new(sales: Vec<Sale>) -> Arc<Self> {
        Self::capped(sales, u32::MAX)
    }

    /// Serves at most `max_limit` rows per page whatever the request asks
    pub fn capped(sales: Vec<Sale>, max_limit: u32) -> Arc<Self> {
        Arc::new(Self { sales, max_limit, requests: Mutex::new(Vec::new()) })
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().clone()
    }
}

fn unused<T>() -> Result<T> {
    Err(PartnerHubError::Internal("not used by this test".into()))
}

#[async_trait]
impl SalesPort for PagedSalesPort {
    async fn list_advanced(
        &self,
        _filters: &SalesFilters,
        page: PageRequest,
        _scope: &RequestScope,
    ) -> Result<ApiResponse<Sale>> {
        self.requests.lock().push(page);
        let limit = page.limit.min(self.max_limit);
        let data: Vec<Sale> = self
            .sales
            .iter()
            .skip(page.offset() as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        let pagination =
            Pagination { limit, offset: page.offset(), total: self.sales.len() as u64 };
        Ok(ApiResponse::ok(data, Some(pagination)))
    }

    async fn get(&self, _id: &str, _scope: &RequestScope) -> Result<Sale> {
        unused()
    }

    async fn create(&self, _input: &SaleInput, _scope: &RequestScope) -> Result<Sale> {
        unused()
    }

    async fn export(
        &self,
        _filters: &SalesFilters,
        _format: ExportFormat,
        _scope: &RequestScope,
    ) -> Result<ExportPayload> {
        unused()
    }

    async fn list_stove_ids(
        &self,
        _filters: &StoveIdFilters,
        _page: PageRequest,
        _scope: &RequestScope,
    ) -> Result<ApiResponse<StoveRecord>> {
        unused()
    }
}
