//! Sales dashboard aggregates over the sales port

use std::sync::Arc;

use partnerhub_domain::constants::MAX_PAGE_SIZE;
use partnerhub_domain::{
    PageRequest, PartnerHubError, Result, Sale, SalesFilters, SalesTotals, StateSalesPoint,
};
use tracing::debug;

use super::heatmap::{sales_totals, state_heatmap};
use crate::sales::SalesPort;
use crate::scope::RequestScope;

/// Upper bound on pages walked for one aggregate
const MAX_PAGES: u32 = 200;

pub struct SalesAnalytics {
    sales: Arc<dyn SalesPort>,
}

impl SalesAnalytics {
    pub fn new(sales: Arc<dyn SalesPort>) -> Self {
        Self { sales }
    }

    pub async fn heatmap(
        &self,
        filters: &SalesFilters,
        scope: &RequestScope,
    ) -> Result<Vec<StateSalesPoint>> {
        let sales = self.collect(filters, scope).await?;
        Ok(state_heatmap(&sales))
    }

    pub async fn totals(&self, filters: &SalesFilters, scope: &RequestScope) -> Result<SalesTotals> {
        let sales = self.collect(filters, scope).await?;
        Ok(sales_totals(&sales))
    }

    /// Walk the listing until the reported total is reached or a page comes
    /// back empty
    ///
    /// The backend may serve fewer rows than asked for; the page size then
    /// shrinks to what it served so the next offset lines up with the rows
    /// already collected.
    async fn collect(&self, filters: &SalesFilters, scope: &RequestScope) -> Result<Vec<Sale>> {
        let mut sales = Vec::new();
        let mut limit = MAX_PAGE_SIZE;
        for round in 1..=MAX_PAGES {
            let collected = u32::try_from(sales.len()).map_err(|_| {
                PartnerHubError::InvalidResponse("sales listing too large to aggregate".into())
            })?;
            if collected % limit != 0 {
                return Err(PartnerHubError::InvalidResponse(format!(
                    "sales listing served a partial page of {limit} rows before the end"
                )));
            }
            let request = PageRequest::new(collected / limit + 1, limit);
            let response = self.sales.list_advanced(filters, request, scope).await?;
            let pagination = response.pagination_or(&request);
            let fetched = response.data.len();
            sales.extend(response.data);

            if fetched == 0 || sales.len() as u64 >= pagination.total {
                debug!(pages = round, sales = sales.len(), "collected sales for aggregation");
                return Ok(sales);
            }
            if fetched < limit as usize {
                debug!(asked = limit, served = fetched, "backend capped the page size");
                limit = fetched as u32;
            }
        }
        Err(PartnerHubError::InvalidResponse(format!(
            "sales listing did not end after {MAX_PAGES} pages"
        )))
    }
}
