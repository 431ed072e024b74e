//! Generic report row fetch
//!
//! Executes a [`CompiledQuery`] produced by the filter compiler: one
//! COUNT for the exact pre-limit match total, one capped row fetch.

use shared::models::Row;
use sqlx::PgPool;

use super::BoxError;
use crate::reports::filter::{Bind, CompiledQuery};

/// Run the compiled count + row statements, returning the fetched rows
/// and the exact pre-limit match count.
pub async fn count_and_fetch(
    pool: &PgPool,
    compiled: &CompiledQuery,
) -> Result<(Vec<Row>, i64), BoxError> {
    let mut count_q = sqlx::query_scalar::<_, i64>(&compiled.count_sql);
    for bind in &compiled.binds {
        count_q = match bind {
            Bind::Text(v) => count_q.bind(v.clone()),
            Bind::Number(v) => count_q.bind(*v),
            Bind::Int(v) => count_q.bind(*v),
            Bind::Bool(v) => count_q.bind(*v),
        };
    }
    let total = count_q.fetch_one(pool).await?;

    let mut rows_q = sqlx::query_as::<_, (serde_json::Value,)>(&compiled.rows_sql);
    for bind in &compiled.binds {
        rows_q = match bind {
            Bind::Text(v) => rows_q.bind(v.clone()),
            Bind::Number(v) => rows_q.bind(*v),
            Bind::Int(v) => rows_q.bind(*v),
            Bind::Bool(v) => rows_q.bind(*v),
        };
    }
    let raw = rows_q.fetch_all(pool).await?;

    let rows = raw
        .into_iter()
        .map(|(data,)| data.as_object().cloned().unwrap_or_default())
        .collect();

    Ok((rows, total))
}
