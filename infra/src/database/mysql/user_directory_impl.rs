//! MySQL implementation of the UserDirectory trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sm_core::domain::entities::user::User;
use sm_core::errors::DomainError;
use sm_core::repositories::UserDirectory;

/// MySQL implementation of UserDirectory
pub struct MySqlUserDirectory {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    /// Create a new MySQL user directory
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Store {
            message: format!("failed to get id: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Store {
                message: format!("invalid user UUID: {}", e),
            })?,
            display_name: row
                .try_get("display_name")
                .map_err(|e| DomainError::Store {
                    message: format!("failed to get display_name: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Store {
                    message: format!("failed to get created_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = "SELECT id, display_name, created_at FROM users WHERE id = ?";

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Store {
                message: format!("failed to query user: {}", e),
            })?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }
}
