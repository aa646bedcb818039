//! MySQL implementation of the TokenBlacklist trait.
//!
//! Revoked tokens are stored by their SHA-256 digest in the
//! `revoked_tokens` table together with the underlying token's expiry,
//! so entries can be pruned once the token could no longer be replayed.
//!
//! ```sql
//! CREATE TABLE revoked_tokens (
//!     token_hash CHAR(64) PRIMARY KEY,
//!     revoked_at DATETIME(6) NOT NULL,
//!     expires_at DATETIME(6) NOT NULL,
//!     INDEX idx_revoked_expires (expires_at)
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sm_core::errors::DomainError;
use sm_core::repositories::{hash_token, TokenBlacklist};

/// MySQL implementation of TokenBlacklist
pub struct MySqlTokenBlacklist {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenBlacklist {
    /// Create a new MySQL token blacklist
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn store_error(context: &str, e: sqlx::Error) -> DomainError {
        DomainError::Store {
            message: format!("{}: {}", context, e),
        }
    }
}

#[async_trait]
impl TokenBlacklist for MySqlTokenBlacklist {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        // Idempotent upsert: a duplicate insert keeps the original row,
        // so concurrent logouts for the same token are safe
        let query = r#"
            INSERT INTO revoked_tokens (token_hash, revoked_at, expires_at)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE token_hash = token_hash
        "#;

        sqlx::query(query)
            .bind(hash_token(token))
            .bind(Utc::now())
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::store_error("failed to insert revoked token", e))?;

        Ok(())
    }

    async fn contains(&self, token: &str) -> Result<bool, DomainError> {
        let query =
            "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token_hash = ?) AS present";

        let row = sqlx::query(query)
            .bind(hash_token(token))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::store_error("failed to check revoked token", e))?;

        let present: i64 = row
            .try_get("present")
            .map_err(|e| Self::store_error("failed to read existence result", e))?;

        Ok(present == 1)
    }

    async fn prune(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::store_error("failed to prune revoked tokens", e))?;

        Ok(result.rows_affected() as usize)
    }
}
