//! Sales, export, heatmap and stove inventory commands

use partnerhub_common::validation::ValidationError;
use partnerhub_domain::constants::{COMPONENT_SALES, COMPONENT_STOVE_IDS};
use partnerhub_domain::{
    ExportFormat, ExportPayload, Page, PageRequest, PartnerHubError, Result, Sale, SaleInput,
    SalesFilters, SalesTotals, StateSalesPoint, StoveIdFilters, StoveRecord,
};

use super::{required, validation_failed};
use crate::context::AppContext;
use crate::utils::execute_command;

pub async fn list_sales(
    ctx: &AppContext,
    filters: SalesFilters,
    page: PageRequest,
) -> Result<Page<Sale>> {
    execute_command("sales::list", || async {
        check_date_range(&filters)?;
        let scope = ctx.scope(COMPONENT_SALES);
        let response = ctx.sales.list_advanced(&filters, page, &scope).await?;
        Ok(Page::from_response(response, &page))
    })
    .await
}

pub async fn get_sale(ctx: &AppContext, id: &str) -> Result<Sale> {
    execute_command("sales::get", || async {
        let id = required("sale id", id)?;
        ctx.sales.get(id, &ctx.scope(COMPONENT_SALES)).await
    })
    .await
}

pub async fn create_sale(ctx: &AppContext, input: SaleInput) -> Result<Sale> {
    execute_command("sales::create", || async {
        let mut errors = ValidationError::new();
        if input.organization_id.trim().is_empty() {
            errors.add_error_with_code("organization_id", "Organization is required", "required");
        }
        if input.quantity == 0 {
            errors.add_error_with_code("quantity", "Quantity must be at least 1", "range");
        }
        errors.into_result(()).map_err(validation_failed)?;

        ctx.sales.create(&input, &ctx.scope(COMPONENT_SALES)).await
    })
    .await
}

/// Export every sale matching `filters` as a downloadable file
pub async fn export_sales(
    ctx: &AppContext,
    filters: SalesFilters,
    format: ExportFormat,
) -> Result<ExportPayload> {
    execute_command("sales::export", || async {
        check_date_range(&filters)?;
        ctx.sales.export(&filters, format, &ctx.scope(COMPONENT_SALES)).await
    })
    .await
}

/// Per-state sales aggregate for the map view
pub async fn sales_heatmap(
    ctx: &AppContext,
    filters: SalesFilters,
) -> Result<Vec<StateSalesPoint>> {
    execute_command("sales::heatmap", || async {
        check_date_range(&filters)?;
        ctx.analytics.heatmap(&filters, &ctx.scope(COMPONENT_SALES)).await
    })
    .await
}

pub async fn sales_totals(ctx: &AppContext, filters: SalesFilters) -> Result<SalesTotals> {
    execute_command("sales::totals", || async {
        check_date_range(&filters)?;
        ctx.analytics.totals(&filters, &ctx.scope(COMPONENT_SALES)).await
    })
    .await
}

pub async fn list_stove_ids(
    ctx: &AppContext,
    filters: StoveIdFilters,
    page: PageRequest,
) -> Result<Page<StoveRecord>> {
    execute_command("sales::list_stove_ids", || async {
        let scope = ctx.scope(COMPONENT_STOVE_IDS);
        let response = ctx.sales.list_stove_ids(&filters, page, &scope).await?;
        Ok(Page::from_response(response, &page))
    })
    .await
}

fn check_date_range(filters: &SalesFilters) -> Result<()> {
    match (filters.date_from, filters.date_to) {
        (Some(from), Some(to)) if from > to => Err(PartnerHubError::InvalidInput(format!(
            "date range starts after it ends ({from} > {to})"
        ))),
        _ => Ok(()),
    }
}
