//! End-to-end coverage of the ad-hoc report pipeline, database
//! excluded: registry lookup, validation, compilation and finalization
//! run exactly as in a request, with the fetched window supplied
//! in-memory.

use chrono::NaiveDate;
use serde_json::{Value, json};
use shared::models::{FilterOp, Metric, ReportConfig, ReportFilter, Row};

use quipu_reports::reports::{executor, filter, sources};

fn base_config(source_id: &str) -> ReportConfig {
    ReportConfig {
        source_id: source_id.into(),
        columns: vec![],
        filters: vec![],
        group_by: None,
        metric: None,
        metric_column: None,
        date_from: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        date_to: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        limit: 100,
    }
}

fn sale(folio: &str, estado: &str, total: f64, metodo: &str) -> Row {
    [
        ("folio".to_string(), json!(folio)),
        ("estado".to_string(), json!(estado)),
        ("total".to_string(), json!(total)),
        ("metodo_pago".to_string(), json!(metodo)),
    ]
    .into_iter()
    .collect()
}

#[test]
fn every_registered_source_compiles_with_defaults() {
    for source in sources::sources() {
        let cfg = base_config(&source.id);
        executor::validate(source, &cfg).unwrap();
        let q = filter::compile(source, &cfg, "tenant-1").unwrap();
        assert!(q.rows_sql.starts_with(&format!("SELECT data FROM {}", source.table)));
        assert!(q.count_sql.contains("tenant_id = $1"));
    }
}

#[test]
fn sales_by_status_with_sum_metric() {
    let source = sources::source("ventas").unwrap();
    let mut cfg = base_config("ventas");
    cfg.filters = vec![ReportFilter {
        column: "estado".into(),
        op: FilterOp::Neq,
        value: json!("cancelled"),
    }];
    cfg.group_by = Some("estado".into());
    cfg.metric = Some(Metric::Sum);
    cfg.metric_column = Some("total".into());

    executor::validate(source, &cfg).unwrap();
    let q = filter::compile(source, &cfg, "tenant-1").unwrap();
    assert!(q.rows_sql.contains("data->>'estado' <> $2"));

    // The fetched window, as the store would return it
    let rows = vec![
        sale("A-1", "completed", 120.0, "card"),
        sale("A-2", "completed", 80.0, "cash"),
        sale("A-3", "refunded", 30.0, "card"),
    ];
    let result = executor::finalize(&cfg, rows, 3);

    assert!(result.aggregated);
    assert_eq!(result.total, 2);
    assert_eq!(result.columns, vec!["estado", "sum_total", "_count"]);
    // Groups ordered by metric descending
    assert_eq!(result.rows[0]["estado"], json!("completed"));
    assert_eq!(result.rows[0]["sum_total"], json!(200.0));
    assert_eq!(result.rows[0]["_count"], json!(2));
    assert_eq!(result.rows[1]["estado"], json!("refunded"));
    assert_eq!(result.rows[1]["sum_total"], json!(30.0));
}

#[test]
fn count_per_group_conserves_row_count() {
    let mut cfg = base_config("ventas");
    cfg.group_by = Some("metodo_pago".into());
    cfg.metric = Some(Metric::Count);

    let rows = vec![
        sale("A-1", "completed", 10.0, "card"),
        sale("A-2", "completed", 10.0, "card"),
        sale("A-3", "completed", 10.0, "cash"),
        sale("A-4", "completed", 10.0, "transfer"),
    ];
    let result = executor::finalize(&cfg, rows, 4);

    let counted: i64 = result
        .rows
        .iter()
        .map(|r| r["count"].as_i64().unwrap())
        .sum();
    assert_eq!(counted, 4);
}

#[test]
fn projection_and_missing_columns() {
    let mut cfg = base_config("ventas");
    cfg.columns = vec!["folio".into(), "descuento".into()];

    let result = executor::finalize(&cfg, vec![sale("A-1", "completed", 10.0, "card")], 1);
    assert_eq!(result.columns, vec!["folio", "descuento"]);
    assert_eq!(result.rows[0]["folio"], json!("A-1"));
    assert_eq!(result.rows[0]["descuento"], Value::Null);
}

#[test]
fn date_window_covers_whole_end_day() {
    let cfg = base_config("ventas");
    let from = filter::day_start_ms(cfg.date_from);
    let to = filter::day_end_ms(cfg.date_to);
    // 31 full days, last millisecond included
    assert_eq!(to - from + 1, 31 * 86_400_000);
}

#[test]
fn unknown_source_is_absent_from_registry() {
    assert!(sources::source("nómina").is_none());
}
