//! Inventory rollups
//!
//! Fixed-shape analytics over the stock / movement / sales projections.
//! Each rollup is an independent, stateless read path: fetch the typed
//! projections for the tenant (and optional branch), then reduce them
//! with a pure computation. The rollups share one classification rule,
//! [`shared::models::StockStatus::classify`].

pub mod categories;
pub mod kpi;
pub mod movements;
pub mod stock;
pub mod turnover;

use chrono::Utc;
use shared::error::{AppError, AppResult};
use shared::models::{
    InventarioKpi, InventoryFilter, MovimientoPorDia, RotacionProducto, StockPorCategoria,
    StockProducto,
};
use sqlx::PgPool;
use std::collections::HashMap;

use crate::db::{self, BoxError};
use crate::reports::filter::{day_end_ms, day_start_ms};

/// Bucket label for stock rows without a category. A missing dimension
/// is bucketed, never dropped.
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

/// Reporting window in epoch milliseconds; open ends default to the
/// epoch start and to now.
fn range_ms(filter: &InventoryFilter) -> (i64, i64) {
    let from = filter.date_from.map(day_start_ms).unwrap_or(0);
    let to = filter
        .date_to
        .map(day_end_ms)
        .unwrap_or_else(|| Utc::now().timestamp_millis());
    (from, to)
}

fn store_error(context: &str, e: BoxError) -> AppError {
    tracing::error!("{context} query error: {e}");
    AppError::database(e.to_string())
}

/// KPI summary for the reporting window
pub async fn kpi_summary(
    pool: &PgPool,
    tenant_id: &str,
    filter: &InventoryFilter,
) -> AppResult<InventarioKpi> {
    let branch = filter.branch_id.as_deref();
    let stock = db::inventory::fetch_stock_levels(pool, tenant_id, branch)
        .await
        .map_err(|e| store_error("Stock levels", e))?;
    let (from_ms, to_ms) = range_ms(filter);
    let movements = db::inventory::fetch_movements(pool, tenant_id, branch, from_ms, to_ms)
        .await
        .map_err(|e| store_error("Movements", e))?;
    Ok(kpi::compute_kpi(&stock, &movements))
}

/// Classified stock listing
pub async fn stock_listing(
    pool: &PgPool,
    tenant_id: &str,
    filter: &InventoryFilter,
) -> AppResult<Vec<StockProducto>> {
    let stock = db::inventory::fetch_stock_levels(pool, tenant_id, filter.branch_id.as_deref())
        .await
        .map_err(|e| store_error("Stock levels", e))?;
    Ok(stock::classify_stock(&stock, filter))
}

/// Stock valuation per category
pub async fn category_breakdown(
    pool: &PgPool,
    tenant_id: &str,
    filter: &InventoryFilter,
) -> AppResult<Vec<StockPorCategoria>> {
    let stock = db::inventory::fetch_stock_levels(pool, tenant_id, filter.branch_id.as_deref())
        .await
        .map_err(|e| store_error("Stock levels", e))?;
    Ok(categories::stock_by_category(&stock))
}

/// Day-bucketed movement series for the reporting window
pub async fn movement_series(
    pool: &PgPool,
    tenant_id: &str,
    filter: &InventoryFilter,
) -> AppResult<Vec<MovimientoPorDia>> {
    let (from_ms, to_ms) = range_ms(filter);
    let rows =
        db::inventory::fetch_movements(pool, tenant_id, filter.branch_id.as_deref(), from_ms, to_ms)
            .await
            .map_err(|e| store_error("Movements", e))?;
    Ok(movements::movements_by_day(&rows))
}

/// Turnover ranking over the reporting window.
///
/// Sold units come from non-cancelled sales joined in id batches of
/// `batch_size`; a failed batch aborts the whole computation rather
/// than degrading to partial results.
pub async fn turnover_ranking(
    pool: &PgPool,
    tenant_id: &str,
    filter: &InventoryFilter,
    top_n: usize,
    batch_size: usize,
) -> AppResult<Vec<RotacionProducto>> {
    let branch = filter.branch_id.as_deref();
    let stock = db::inventory::fetch_stock_levels(pool, tenant_id, branch)
        .await
        .map_err(|e| store_error("Stock levels", e))?;

    let (from_ms, to_ms) = range_ms(filter);
    let sale_ids = db::inventory::fetch_completed_sale_ids(pool, tenant_id, branch, from_ms, to_ms)
        .await
        .map_err(|e| store_error("Sale ids", e))?;

    let mut sold: HashMap<String, f64> = HashMap::new();
    for chunk in sale_ids.chunks(batch_size.max(1)) {
        let batch = db::inventory::fetch_sold_quantities(pool, tenant_id, chunk)
            .await
            .map_err(|e| {
                tracing::error!("Sold quantities batch error: {e}");
                AppError::with_message(shared::ErrorCode::TurnoverJoinFailed, e.to_string())
            })?;
        for row in batch {
            *sold.entry(row.product_id).or_insert(0.0) += row.units;
        }
    }

    Ok(turnover::rank_turnover(&stock, &sold, top_n))
}
