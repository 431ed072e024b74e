//! Application state for the reporting service

use sqlx::PgPool;

use crate::config::Config;
use crate::db::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Sale-id batch size for the turnover sales join
    pub sale_batch_size: usize,
}

impl AppState {
    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            sale_batch_size: config.sale_batch_size,
        })
    }
}
