//! Inventory projection queries
//!
//! Typed read paths for the inventory rollups: stock snapshots,
//! movement records, and sold quantities joined from completed sales.

use sqlx::PgPool;

use super::BoxError;

/// Stock snapshot projection (one row per product per branch)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StockLevelRow {
    pub product_id: String,
    pub product_name: String,
    pub category: Option<String>,
    pub branch_id: Option<String>,
    pub qty_on_hand: f64,
    pub qty_reserved: f64,
    pub avg_cost: f64,
    pub min_level: f64,
}

/// Movement record projection
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovementRow {
    pub product_id: String,
    /// 'in' or 'out'
    pub direction: String,
    pub quantity: f64,
    pub unit_cost: f64,
    pub source: Option<String>,
    /// Epoch milliseconds
    pub occurred_at: i64,
}

/// Sold units per product, aggregated in the store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SoldRow {
    pub product_id: String,
    pub units: f64,
}

pub async fn fetch_stock_levels(
    pool: &PgPool,
    tenant_id: &str,
    branch_id: Option<&str>,
) -> Result<Vec<StockLevelRow>, BoxError> {
    let rows: Vec<StockLevelRow> = sqlx::query_as(
        r#"
        SELECT product_id, product_name, category, branch_id,
               qty_on_hand, qty_reserved, avg_cost, min_level
        FROM stock_levels
        WHERE tenant_id = $1 AND ($2::TEXT IS NULL OR branch_id = $2)
        ORDER BY product_name
        "#,
    )
    .bind(tenant_id)
    .bind(branch_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn fetch_movements(
    pool: &PgPool,
    tenant_id: &str,
    branch_id: Option<&str>,
    from_ms: i64,
    to_ms: i64,
) -> Result<Vec<MovementRow>, BoxError> {
    let rows: Vec<MovementRow> = sqlx::query_as(
        r#"
        SELECT product_id, direction, quantity, unit_cost, source, occurred_at
        FROM inventory_movements
        WHERE tenant_id = $1 AND ($2::TEXT IS NULL OR branch_id = $2)
            AND occurred_at >= $3 AND occurred_at <= $4
        ORDER BY occurred_at
        "#,
    )
    .bind(tenant_id)
    .bind(branch_id)
    .bind(from_ms)
    .bind(to_ms)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Ids of non-cancelled sales completed within the range
pub async fn fetch_completed_sale_ids(
    pool: &PgPool,
    tenant_id: &str,
    branch_id: Option<&str>,
    from_ms: i64,
    to_ms: i64,
) -> Result<Vec<i64>, BoxError> {
    let ids: Vec<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM sales
        WHERE tenant_id = $1 AND ($2::TEXT IS NULL OR branch_id = $2)
            AND status <> 'cancelled'
            AND completed_at >= $3 AND completed_at <= $4
        "#,
    )
    .bind(tenant_id)
    .bind(branch_id)
    .bind(from_ms)
    .bind(to_ms)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Sold quantities for one batch of sale ids
pub async fn fetch_sold_quantities(
    pool: &PgPool,
    tenant_id: &str,
    sale_ids: &[i64],
) -> Result<Vec<SoldRow>, BoxError> {
    let rows: Vec<SoldRow> = sqlx::query_as(
        r#"
        SELECT product_id, COALESCE(SUM(quantity), 0) AS units
        FROM sale_items
        WHERE tenant_id = $1 AND sale_id = ANY($2)
        GROUP BY product_id
        "#,
    )
    .bind(tenant_id)
    .bind(sale_ids.to_vec())
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
