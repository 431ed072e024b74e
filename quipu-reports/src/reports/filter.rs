//! Filter compiler
//!
//! Turns `ReportConfig` filters plus the mandatory date range into SQL
//! predicates with bound parameters against the source's JSONB `data`
//! column. Tenant id is always the first bind; the date bound is always
//! applied, inclusive of the end day.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::error::{AppError, AppResult};
use shared::models::{ColumnKind, FilterOp, ReportConfig, ReportSource};
use serde_json::Value;

const MS_PER_DAY: i64 = 86_400_000;

/// A query parameter bound at execution time
#[derive(Debug, Clone, PartialEq)]
pub enum Bind {
    Text(String),
    Number(f64),
    Int(i64),
    Bool(bool),
}

/// A compiled, executable report query
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    /// Exact pre-limit match count
    pub count_sql: String,
    /// Row fetch, ordered by the date field descending, capped
    pub rows_sql: String,
    /// Positional binds shared by both statements
    pub binds: Vec<Bind>,
}

/// Epoch milliseconds at the start of a calendar day (UTC)
pub fn day_start_ms(date: NaiveDate) -> i64 {
    NaiveDateTime::new(date, NaiveTime::MIN)
        .and_utc()
        .timestamp_millis()
}

/// Epoch milliseconds at the inclusive end of a calendar day
/// (23:59:59.999 UTC)
pub fn day_end_ms(date: NaiveDate) -> i64 {
    day_start_ms(date) + MS_PER_DAY - 1
}

/// Column keys are interpolated into JSONB accessors, so only plain
/// identifiers are allowed through. Keys unknown to the registry still
/// compile (the accessor yields NULL and the predicate matches
/// nothing), but a malformed key is rejected outright.
fn is_safe_ident(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// JSONB accessor with the cast the registry declares for the column.
/// Columns the registry does not know are treated as text.
fn column_expr(source: &ReportSource, key: &str) -> String {
    let kind = source.column(key).map(|c| c.kind);
    match kind {
        Some(ColumnKind::Number) => format!("(data->>'{key}')::numeric"),
        Some(ColumnKind::Date) => format!("(data->>'{key}')::bigint"),
        Some(ColumnKind::Boolean) => format!("(data->>'{key}')::boolean"),
        _ => format!("data->>'{key}'"),
    }
}

/// True when a filter value is "not yet specified" by the UI
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn coerce_bind(source: &ReportSource, key: &str, value: &Value) -> AppResult<Bind> {
    let kind = source.column(key).map(|c| c.kind);
    match kind {
        Some(ColumnKind::Number) | Some(ColumnKind::Date) => {
            let n = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }
            .ok_or_else(|| {
                AppError::validation(format!("Filter value for '{key}' is not numeric"))
                    .with_detail("column", key.to_string())
            })?;
            if matches!(kind, Some(ColumnKind::Date)) {
                Ok(Bind::Int(n as i64))
            } else {
                Ok(Bind::Number(n))
            }
        }
        Some(ColumnKind::Boolean) => {
            let b = match value {
                Value::Bool(b) => Some(*b),
                Value::String(s) => s.trim().parse::<bool>().ok(),
                _ => None,
            }
            .ok_or_else(|| {
                AppError::validation(format!("Filter value for '{key}' is not boolean"))
                    .with_detail("column", key.to_string())
            })?;
            Ok(Bind::Bool(b))
        }
        _ => {
            let s = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Ok(Bind::Text(s))
        }
    }
}

/// Compile a report config into executable SQL for its source.
///
/// Predicate order: tenant scope, explicit filters, then the mandatory
/// date bound against the source's date field.
pub fn compile(
    source: &ReportSource,
    config: &ReportConfig,
    tenant_id: &str,
) -> AppResult<CompiledQuery> {
    let mut binds: Vec<Bind> = vec![Bind::Text(tenant_id.to_string())];
    let mut preds: Vec<String> = vec!["tenant_id = $1".to_string()];

    for filter in &config.filters {
        // Unspecified filters are skipped, not an error
        if filter.column.is_empty() {
            continue;
        }
        if filter.op != FilterOp::IsNull && is_empty_value(&filter.value) {
            continue;
        }
        if !is_safe_ident(&filter.column) {
            return Err(
                AppError::validation(format!("Invalid filter column '{}'", filter.column))
                    .with_detail("column", filter.column.clone()),
            );
        }

        let expr = column_expr(source, &filter.column);
        match filter.op {
            FilterOp::IsNull => {
                preds.push(format!("data->>'{}' IS NULL", filter.column));
            }
            FilterOp::Like => {
                let needle = match &filter.value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                binds.push(Bind::Text(format!("%{needle}%")));
                preds.push(format!("data->>'{}' ILIKE ${}", filter.column, binds.len()));
            }
            op => {
                binds.push(coerce_bind(source, &filter.column, &filter.value)?);
                let sql_op = match op {
                    FilterOp::Eq => "=",
                    FilterOp::Neq => "<>",
                    FilterOp::Gt => ">",
                    FilterOp::Gte => ">=",
                    FilterOp::Lt => "<",
                    FilterOp::Lte => "<=",
                    FilterOp::Like | FilterOp::IsNull => unreachable!(),
                };
                preds.push(format!("{expr} {sql_op} ${}", binds.len()));
            }
        }
    }

    // Mandatory date bound, inclusive of the end day
    let date_expr = column_expr(source, &source.date_field);
    binds.push(Bind::Int(day_start_ms(config.date_from)));
    preds.push(format!("{date_expr} >= ${}", binds.len()));
    binds.push(Bind::Int(day_end_ms(config.date_to)));
    preds.push(format!("{date_expr} <= ${}", binds.len()));

    let where_sql = preds.join(" AND ");
    let limit = config.limit.max(1);

    Ok(CompiledQuery {
        count_sql: format!("SELECT COUNT(*) FROM {} WHERE {}", source.table, where_sql),
        rows_sql: format!(
            "SELECT data FROM {} WHERE {} ORDER BY {} DESC LIMIT {}",
            source.table, where_sql, date_expr, limit
        ),
        binds,
    })
}
