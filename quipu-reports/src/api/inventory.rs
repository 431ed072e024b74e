//! Inventory rollup endpoints

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{
    InventarioKpi, InventoryFilter, MovimientoPorDia, RotacionProducto, StockPorCategoria,
    StockProducto,
};

use super::ApiResult;
use crate::auth::TenantIdentity;
use crate::inventory;
use crate::inventory::turnover::DEFAULT_TOP_N;
use crate::state::AppState;

/// GET /api/inventory/kpis?branchId=&dateFrom=&dateTo=
pub async fn get_kpis(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Query(filter): Query<InventoryFilter>,
) -> ApiResult<InventarioKpi> {
    let kpi = inventory::kpi_summary(&state.pool, &identity.tenant_id, &filter).await?;
    Ok(Json(kpi))
}

/// GET /api/inventory/stock?branchId=&categoryId=&stockStatus=
pub async fn get_stock(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Query(filter): Query<InventoryFilter>,
) -> ApiResult<Vec<StockProducto>> {
    let stock = inventory::stock_listing(&state.pool, &identity.tenant_id, &filter).await?;
    Ok(Json(stock))
}

/// GET /api/inventory/movements-per-day?branchId=&dateFrom=&dateTo=
pub async fn get_movements_per_day(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Query(filter): Query<InventoryFilter>,
) -> ApiResult<Vec<MovimientoPorDia>> {
    let series = inventory::movement_series(&state.pool, &identity.tenant_id, &filter).await?;
    Ok(Json(series))
}

/// GET /api/inventory/categories?branchId=
pub async fn get_categories(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Query(filter): Query<InventoryFilter>,
) -> ApiResult<Vec<StockPorCategoria>> {
    let breakdown =
        inventory::category_breakdown(&state.pool, &identity.tenant_id, &filter).await?;
    Ok(Json(breakdown))
}

#[derive(Deserialize)]
pub struct TurnoverQuery {
    pub top: Option<usize>,
}

/// GET /api/inventory/turnover?top=N&branchId=&dateFrom=&dateTo=
pub async fn get_turnover(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Query(query): Query<TurnoverQuery>,
    Query(filter): Query<InventoryFilter>,
) -> ApiResult<Vec<RotacionProducto>> {
    let ranking = inventory::turnover_ranking(
        &state.pool,
        &identity.tenant_id,
        &filter,
        query.top.unwrap_or(DEFAULT_TOP_N),
        state.sale_batch_size,
    )
    .await?;
    Ok(Json(ranking))
}

/// Combined dashboard payload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDashboard {
    pub kpis: InventarioKpi,
    pub categorias: Vec<StockPorCategoria>,
    pub movimientos: Vec<MovimientoPorDia>,
    pub rotacion: Vec<RotacionProducto>,
}

/// GET /api/inventory/dashboard?branchId=&dateFrom=&dateTo=
///
/// The four rollups share no mutable state, so they run concurrently.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Query(filter): Query<InventoryFilter>,
) -> ApiResult<InventoryDashboard> {
    let tenant_id = &identity.tenant_id;
    let (kpis, categorias, movimientos, rotacion) = tokio::join!(
        inventory::kpi_summary(&state.pool, tenant_id, &filter),
        inventory::category_breakdown(&state.pool, tenant_id, &filter),
        inventory::movement_series(&state.pool, tenant_id, &filter),
        inventory::turnover_ranking(
            &state.pool,
            tenant_id,
            &filter,
            DEFAULT_TOP_N,
            state.sale_batch_size,
        ),
    );

    Ok(Json(InventoryDashboard {
        kpis: kpis?,
        categorias: categorias?,
        movimientos: movimientos?,
        rotacion: rotacion?,
    }))
}
