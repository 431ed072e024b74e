//! Saved report persistence
//!
//! Simple CRUD around the serialized `ReportConfig` blob; the engine
//! itself never reads these back except to replay them on request.

use shared::models::SavedReport;
use sqlx::PgPool;

use super::BoxError;

#[derive(sqlx::FromRow)]
struct SavedReportRow {
    id: String,
    tenant_id: String,
    user_id: Option<String>,
    name: String,
    config: serde_json::Value,
    created_at: i64,
}

impl SavedReportRow {
    fn into_model(self) -> Result<SavedReport, BoxError> {
        Ok(SavedReport {
            config: serde_json::from_value(self.config)?,
            id: self.id,
            tenant_id: self.tenant_id,
            user_id: self.user_id,
            name: self.name,
            created_at: self.created_at,
        })
    }
}

pub async fn insert_saved_report(pool: &PgPool, report: &SavedReport) -> Result<(), BoxError> {
    sqlx::query(
        r#"
        INSERT INTO saved_reports (id, tenant_id, user_id, name, config, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(&report.id)
    .bind(&report.tenant_id)
    .bind(&report.user_id)
    .bind(&report.name)
    .bind(serde_json::to_value(&report.config)?)
    .bind(report.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn list_saved_reports(
    pool: &PgPool,
    tenant_id: &str,
) -> Result<Vec<SavedReport>, BoxError> {
    let rows: Vec<SavedReportRow> = sqlx::query_as(
        r#"
        SELECT id, tenant_id, user_id, name, config, created_at
        FROM saved_reports
        WHERE tenant_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SavedReportRow::into_model).collect()
}

/// Delete a saved report; returns false when no row matched
pub async fn delete_saved_report(
    pool: &PgPool,
    tenant_id: &str,
    id: &str,
) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM saved_reports WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
