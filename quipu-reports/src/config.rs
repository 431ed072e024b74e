//! Reporting service configuration

use crate::db::BoxError;

/// Service configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Sale-id batch size for the turnover sales join
    pub sale_batch_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, BoxError> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ if environment == "development" => {
                "postgres://localhost/quipu_dev".to_string()
            }
            _ => {
                return Err(
                    format!("DATABASE_URL must be set in {environment} environment").into(),
                );
            }
        };

        let http_port = std::env::var("HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let sale_batch_size = std::env::var("SALE_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(200);

        Ok(Self {
            database_url,
            http_port,
            environment,
            sale_batch_size,
        })
    }
}
