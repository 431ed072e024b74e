//! Ad-hoc report endpoints: sources, execution, saved reports

use axum::{Extension, Json, extract::Path, extract::State};
use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{ReportConfig, ReportResult, ReportSource, SavedReport, SavedReportCreate};

use super::ApiResult;
use crate::auth::TenantIdentity;
use crate::db::saved_reports;
use crate::reports::{self, sources};
use crate::state::AppState;

/// GET /api/reports/sources
pub async fn list_sources() -> ApiResult<Vec<ReportSource>> {
    Ok(Json(sources::sources().to_vec()))
}

/// POST /api/reports/execute
pub async fn execute_report(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(config): Json<ReportConfig>,
) -> ApiResult<ReportResult> {
    let result = reports::execute_report(&state.pool, &identity.tenant_id, &config).await?;
    Ok(Json(result))
}

/// GET /api/reports/saved
pub async fn list_saved(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<Vec<SavedReport>> {
    let reports = saved_reports::list_saved_reports(&state.pool, &identity.tenant_id)
        .await
        .map_err(|e| {
            tracing::error!("Saved reports query error: {e}");
            AppError::database(e.to_string())
        })?;
    Ok(Json(reports))
}

/// POST /api/reports/saved
///
/// Stores the config verbatim for later replay; the config is not
/// validated here beyond deserialization, since it is re-validated on
/// every execution.
pub async fn create_saved(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(payload): Json<SavedReportCreate>,
) -> ApiResult<SavedReport> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Report name must not be empty"));
    }

    let report = SavedReport {
        id: uuid::Uuid::new_v4().to_string(),
        tenant_id: identity.tenant_id.clone(),
        user_id: identity.user_id.clone(),
        name: payload.name,
        config: payload.config,
        created_at: Utc::now().timestamp_millis(),
    };

    saved_reports::insert_saved_report(&state.pool, &report)
        .await
        .map_err(|e| {
            tracing::error!("Saved report insert error: {e}");
            AppError::database(e.to_string())
        })?;

    Ok(Json(report))
}

/// DELETE /api/reports/saved/:id
pub async fn delete_saved(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let deleted = saved_reports::delete_saved_report(&state.pool, &identity.tenant_id, &id)
        .await
        .map_err(|e| {
            tracing::error!("Saved report delete error: {e}");
            AppError::database(e.to_string())
        })?;

    if !deleted {
        return Err(AppError::new(ErrorCode::SavedReportNotFound));
    }
    Ok(Json(()))
}
