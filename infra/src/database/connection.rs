//! Database connection pool management
//!
//! Connection pooling over SQLx with MySQL, configured from the shared
//! database configuration.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::time::Duration;
use tracing::info;

use sm_core::errors::DomainError;
use sm_shared::config::DatabaseConfig;

/// Create a MySQL connection pool
///
/// # Arguments
/// * `config` - Database configuration settings
///
/// # Returns
/// * `Ok(MySqlPool)` - Ready connection pool
/// * `Err(DomainError::Store)` - The database could not be reached
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DomainError> {
    info!(
        max_connections = config.max_connections,
        "creating database connection pool"
    );

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .max_lifetime(Duration::from_secs(config.max_lifetime))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::Store {
            message: format!("failed to connect to database: {}", e),
        })
}

/// Verify that the pool can execute a query
pub async fn health_check(pool: &MySqlPool) -> Result<(), DomainError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| DomainError::Store {
            message: format!("database health check failed: {}", e),
        })
}
