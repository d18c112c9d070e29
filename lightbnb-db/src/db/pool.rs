//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and an acquire timeout
//! taken from [`DatabaseConfig`].

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection settings are malformed or the first
/// connection fails.
///
/// # Example
///
/// ```ignore
/// let config = LightbnbConfig::load();
/// let pool = create_pool(&config.database).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = config.connect_options()?;

    tracing::debug!(
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}
