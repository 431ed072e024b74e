//! Client-side aggregator
//!
//! Optional group-by/metric reduction over the already-fetched row
//! set. This deliberately operates on at most `limit` rows (the rows
//! the executor fetched), not the full matching set; pushing grouping
//! into the store would change the engine's memory and performance
//! characteristics and is explicitly not done here.

use serde_json::Value;
use shared::models::{Metric, Row};
use std::collections::BTreeMap;

/// Bucket label for rows whose group-by field is missing or null.
/// Preserved, never dropped, so bucket counts stay consistent with the
/// unaggregated row count.
pub const MISSING_GROUP_LABEL: &str = "(vacío)";

/// String coercion of a group-by cell
fn group_key(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_GROUP_LABEL.to_string(),
        Some(Value::String(s)) if s.is_empty() => MISSING_GROUP_LABEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Numeric coercion of a metric cell; non-numeric or missing values
/// count as 0
pub fn numeric_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    }
}

/// Output key for the metric column:
/// `count` for a plain count, `sum_<col>` / `avg_<col>` otherwise
fn metric_key(metric: Metric, metric_column: Option<&str>) -> String {
    match (metric, metric_column) {
        (Metric::Count, _) | (_, None) => "count".to_string(),
        (m, Some(col)) => format!("{}_{}", m.as_str(), col),
    }
}

/// Partition rows by the string value of `row[group_by]` and reduce
/// each bucket with the metric. Returns one row per bucket,
/// `{ <group_by>: key, <metric key>: value, "_count": size }`, sorted
/// by metric value descending.
pub fn aggregate_rows(
    rows: &[Row],
    group_by: &str,
    metric: Metric,
    metric_column: Option<&str>,
) -> Vec<Row> {
    let mut buckets: BTreeMap<String, (i64, f64)> = BTreeMap::new();

    for row in rows {
        let key = group_key(row.get(group_by));
        let value = metric_column
            .map(|col| numeric_value(row.get(col)))
            .unwrap_or(0.0);
        let entry = buckets.entry(key).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += value;
    }

    let out_key = metric_key(metric, metric_column);
    let mut out: Vec<(f64, Row)> = buckets
        .into_iter()
        .map(|(key, (count, sum))| {
            // Buckets are built from at least one row, so avg is safe
            let value = match metric {
                Metric::Count => count as f64,
                Metric::Sum => sum,
                Metric::Avg => sum / count as f64,
            };
            let mut row = Row::new();
            row.insert(group_by.to_string(), Value::String(key));
            row.insert(out_key.clone(), Value::from(value));
            row.insert("_count".to_string(), Value::from(count));
            (value, row)
        })
        .collect();

    out.sort_by(|a, b| b.0.total_cmp(&a.0));
    out.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            row(&[("estado", json!("completed")), ("total", json!(100.5))]),
            row(&[("estado", json!("completed")), ("total", json!(50.0))]),
            row(&[("estado", json!("cancelled")), ("total", json!(0))]),
            row(&[("total", json!(30.0))]), // no estado
        ]
    }

    #[test]
    fn test_sum_sorted_descending() {
        let out = aggregate_rows(&sample_rows(), "estado", Metric::Sum, Some("total"));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0]["estado"], json!("completed"));
        assert_eq!(out[0]["sum_total"], json!(150.5));
        assert_eq!(out[0]["_count"], json!(2));
        assert_eq!(out[1]["estado"], json!(MISSING_GROUP_LABEL));
        assert_eq!(out[1]["sum_total"], json!(30.0));
        assert_eq!(out[2]["estado"], json!("cancelled"));
        assert_eq!(out[2]["sum_total"], json!(0.0));
    }

    #[test]
    fn test_count_conservation() {
        // Sum of _count over buckets equals the input row count
        let rows = sample_rows();
        let out = aggregate_rows(&rows, "estado", Metric::Count, None);
        let total: i64 = out.iter().map(|r| r["_count"].as_i64().unwrap()).sum();
        assert_eq!(total, rows.len() as i64);
    }

    #[test]
    fn test_count_metric_key() {
        let out = aggregate_rows(&sample_rows(), "estado", Metric::Count, None);
        assert!(out[0].contains_key("count"));
        assert_eq!(out[0]["count"], out[0]["_count"].as_i64().unwrap() as f64);
    }

    #[test]
    fn test_avg() {
        let out = aggregate_rows(&sample_rows(), "estado", Metric::Avg, Some("total"));
        let completed = out
            .iter()
            .find(|r| r["estado"] == json!("completed"))
            .unwrap();
        assert_eq!(completed["avg_total"], json!(75.25));
    }

    #[test]
    fn test_missing_and_null_bucketed_under_sentinel() {
        let rows = vec![
            row(&[("estado", Value::Null), ("total", json!(1))]),
            row(&[("total", json!(2))]),
            row(&[("estado", json!("")), ("total", json!(3))]),
        ];
        let out = aggregate_rows(&rows, "estado", Metric::Sum, Some("total"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["estado"], json!(MISSING_GROUP_LABEL));
        assert_eq!(out[0]["_count"], json!(3));
        assert_eq!(out[0]["sum_total"], json!(6.0));
    }

    #[test]
    fn test_non_numeric_metric_coerced_to_zero() {
        let rows = vec![
            row(&[("estado", json!("a")), ("total", json!("12.5"))]),
            row(&[("estado", json!("a")), ("total", json!("n/a"))]),
            row(&[("estado", json!("a"))]),
        ];
        let out = aggregate_rows(&rows, "estado", Metric::Sum, Some("total"));
        assert_eq!(out[0]["sum_total"], json!(12.5));
    }

    #[test]
    fn test_non_string_group_values_coerced() {
        let rows = vec![
            row(&[("sucursal", json!(3)), ("total", json!(1))]),
            row(&[("sucursal", json!(3)), ("total", json!(1))]),
        ];
        let out = aggregate_rows(&rows, "sucursal", Metric::Count, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0]["sucursal"], json!("3"));
    }

    #[test]
    fn test_empty_input() {
        let out = aggregate_rows(&[], "estado", Metric::Sum, Some("total"));
        assert!(out.is_empty());
    }
}
