//! API routes for the reporting service — split into sub-modules by
//! domain

pub mod health;
pub mod inventory;
pub mod reports;

use axum::routing::{get, post};
use axum::{Router, middleware};
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::tenant_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Everything under /api requires a resolved tenant identity
    let api = Router::new()
        .route("/api/reports/sources", get(reports::list_sources))
        .route("/api/reports/execute", post(reports::execute_report))
        .route(
            "/api/reports/saved",
            get(reports::list_saved).post(reports::create_saved),
        )
        .route(
            "/api/reports/saved/{id}",
            axum::routing::delete(reports::delete_saved),
        )
        .route("/api/inventory/kpis", get(inventory::get_kpis))
        .route("/api/inventory/stock", get(inventory::get_stock))
        .route(
            "/api/inventory/movements-per-day",
            get(inventory::get_movements_per_day),
        )
        .route("/api/inventory/categories", get(inventory::get_categories))
        .route("/api/inventory/turnover", get(inventory::get_turnover))
        .route("/api/inventory/dashboard", get(inventory::get_dashboard))
        .layer(middleware::from_fn(tenant_middleware));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
