//! Query executor
//!
//! Orchestrates one ad-hoc report execution: registry resolution,
//! config validation, compilation, the tenant-scoped fetch, then the
//! pure finalization step (projection, optional aggregation, result
//! normalization). The fetch is the only I/O; everything else is pure
//! and exercised directly by tests.

use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::models::{Metric, ReportConfig, ReportResult, ReportSource, Row};
use sqlx::PgPool;

use super::aggregate::aggregate_rows;
use super::{filter, sources};
use crate::db;

/// Validate the config against its resolved source before querying.
///
/// Rejecting a bad aggregation request up front keeps the store out of
/// the failure path for caller mistakes.
pub fn validate(source: &ReportSource, config: &ReportConfig) -> AppResult<()> {
    if config.date_from > config.date_to {
        return Err(AppError::invalid_date_range(format!(
            "dateFrom {} is after dateTo {}",
            config.date_from, config.date_to
        )));
    }

    if config.group_by.is_some() {
        match config.metric {
            Some(metric @ (Metric::Sum | Metric::Avg)) => {
                let column = config.metric_column.as_deref().ok_or_else(|| {
                    AppError::invalid_aggregation(format!(
                        "metric '{}' requires a metricColumn",
                        metric.as_str()
                    ))
                })?;
                let def = source.column(column).ok_or_else(|| {
                    AppError::invalid_aggregation(format!(
                        "metricColumn '{column}' is not a column of source '{}'",
                        source.id
                    ))
                })?;
                if !def.aggregatable {
                    return Err(AppError::invalid_aggregation(format!(
                        "metricColumn '{column}' is not aggregatable"
                    )));
                }
            }
            // count needs no metric column; group_by without a metric
            // simply leaves the result unaggregated
            Some(Metric::Count) | None => {}
        }
    }

    Ok(())
}

/// Project a fetched row onto the explicitly requested columns,
/// preserving the requested order. Missing fields become null.
fn project(row: &Row, columns: &[String]) -> Row {
    columns
        .iter()
        .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Value::Null)))
        .collect()
}

/// Finalize the output contract from the fetched window.
///
/// Aggregation, when requested, is a client-side reduction over the
/// fetched rows: at most `limit` rows, never a second unlimited fetch.
pub fn finalize(config: &ReportConfig, rows: Vec<Row>, total: i64) -> ReportResult {
    let rows: Vec<Row> = if config.columns.is_empty() {
        rows
    } else {
        rows.iter().map(|r| project(r, &config.columns)).collect()
    };

    let (rows, total, aggregated) = match (&config.group_by, config.metric) {
        (Some(group_by), Some(metric)) => {
            let reduced =
                aggregate_rows(&rows, group_by, metric, config.metric_column.as_deref());
            let groups = reduced.len() as i64;
            (reduced, groups, true)
        }
        _ => (rows, total, false),
    };

    // Columns follow the data when present; otherwise fall back to the
    // requested list (possibly empty: unknown columns, zero rows)
    let columns = match rows.first() {
        Some(first) => first.keys().cloned().collect(),
        None => config.columns.clone(),
    };

    ReportResult {
        columns,
        rows,
        total,
        aggregated,
    }
}

/// Execute an ad-hoc report for a tenant.
///
/// Every query is scoped by `tenant_id`; rows of other tenants can
/// never appear in the result regardless of filter content.
pub async fn execute_report(
    pool: &PgPool,
    tenant_id: &str,
    config: &ReportConfig,
) -> AppResult<ReportResult> {
    let source = sources::source(&config.source_id)
        .ok_or_else(|| AppError::source_not_found(&config.source_id))?;

    validate(source, config)?;

    let compiled = filter::compile(source, config, tenant_id)?;

    let (rows, total) = db::report_rows::count_and_fetch(pool, &compiled)
        .await
        .map_err(|e| {
            tracing::error!(source = %source.id, "Report query error: {e}");
            AppError::query_execution(e.to_string()).with_detail("source_id", source.id.clone())
        })?;

    Ok(finalize(config, rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn config() -> ReportConfig {
        ReportConfig {
            source_id: "ventas".into(),
            columns: vec![],
            filters: vec![],
            group_by: None,
            metric: None,
            metric_column: None,
            date_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            limit: 100,
        }
    }

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_validate_inverted_date_range() {
        let source = sources::source("ventas").unwrap();
        let mut cfg = config();
        cfg.date_from = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let err = validate(source, &cfg).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::InvalidDateRange);
    }

    #[test]
    fn test_validate_sum_requires_aggregatable_column() {
        let source = sources::source("ventas").unwrap();
        let mut cfg = config();
        cfg.group_by = Some("estado".into());
        cfg.metric = Some(Metric::Sum);

        cfg.metric_column = None;
        assert_eq!(
            validate(source, &cfg).unwrap_err().code,
            shared::ErrorCode::InvalidAggregation
        );

        cfg.metric_column = Some("cliente".into()); // text, not aggregatable
        assert_eq!(
            validate(source, &cfg).unwrap_err().code,
            shared::ErrorCode::InvalidAggregation
        );

        cfg.metric_column = Some("no_existe".into());
        assert_eq!(
            validate(source, &cfg).unwrap_err().code,
            shared::ErrorCode::InvalidAggregation
        );

        cfg.metric_column = Some("total".into());
        assert!(validate(source, &cfg).is_ok());
    }

    #[test]
    fn test_validate_count_needs_no_metric_column() {
        let source = sources::source("ventas").unwrap();
        let mut cfg = config();
        cfg.group_by = Some("estado".into());
        cfg.metric = Some(Metric::Count);
        assert!(validate(source, &cfg).is_ok());
    }

    #[test]
    fn test_finalize_plain_result() {
        let rows = vec![
            row(&[("folio", json!("A-1")), ("total", json!(10))]),
            row(&[("folio", json!("A-2")), ("total", json!(20))]),
        ];
        let result = finalize(&config(), rows, 42);
        assert!(!result.aggregated);
        assert_eq!(result.total, 42); // pre-limit match count
        assert_eq!(result.columns, vec!["folio", "total"]);
        assert_eq!(result.rows.len(), 2);
    }

    #[test]
    fn test_finalize_projection_preserves_requested_order() {
        let mut cfg = config();
        cfg.columns = vec!["total".into(), "folio".into(), "nota".into()];
        let rows = vec![row(&[
            ("folio", json!("A-1")),
            ("total", json!(10)),
            ("estado", json!("completed")),
        ])];
        let result = finalize(&cfg, rows, 1);
        assert_eq!(result.columns, vec!["total", "folio", "nota"]);
        assert_eq!(result.rows[0]["nota"], Value::Null);
        assert!(!result.rows[0].contains_key("estado"));
    }

    #[test]
    fn test_finalize_aggregated() {
        let mut cfg = config();
        cfg.group_by = Some("estado".into());
        cfg.metric = Some(Metric::Sum);
        cfg.metric_column = Some("total".into());

        let rows = vec![
            row(&[("estado", json!("completed")), ("total", json!(100))]),
            row(&[("estado", json!("completed")), ("total", json!(50))]),
            row(&[("estado", json!("cancelled")), ("total", json!(0))]),
        ];
        let result = finalize(&cfg, rows, 57);
        assert!(result.aggregated);
        // total becomes the group count, not the match count
        assert_eq!(result.total, 2);
        assert_eq!(result.columns, vec!["estado", "sum_total", "_count"]);
        assert_eq!(result.rows[0]["sum_total"], json!(150.0));
    }

    #[test]
    fn test_finalize_group_by_without_metric_stays_unaggregated() {
        let mut cfg = config();
        cfg.group_by = Some("estado".into());
        let rows = vec![row(&[("estado", json!("completed"))])];
        let result = finalize(&cfg, rows, 1);
        assert!(!result.aggregated);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_finalize_empty_result_is_not_an_error() {
        let mut cfg = config();
        cfg.columns = vec!["folio".into()];
        let result = finalize(&cfg, vec![], 0);
        assert_eq!(result.total, 0);
        assert!(result.rows.is_empty());
        // Falls back to the requested columns
        assert_eq!(result.columns, vec!["folio"]);
    }
}
