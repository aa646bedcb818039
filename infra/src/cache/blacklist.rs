//! Redis implementation of the TokenBlacklist trait.
//!
//! Entries are written with a TTL equal to the underlying token's
//! remaining lifetime, so Redis evicts them the moment the token could
//! no longer be replayed anyway. `prune` is therefore a no-op here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::MultiplexedConnection;
use redis::Client;
use tracing::info;

use sm_core::errors::DomainError;
use sm_core::repositories::{hash_token, TokenBlacklist};
use sm_shared::config::CacheConfig;

/// Redis implementation of TokenBlacklist
#[derive(Clone)]
pub struct RedisTokenBlacklist {
    /// Multiplexed connection shared across clones
    connection: MultiplexedConnection,
    /// Prefix applied to every key written by this store
    key_prefix: String,
}

impl RedisTokenBlacklist {
    /// Connect to Redis using the shared cache configuration
    pub async fn new(config: &CacheConfig) -> Result<Self, DomainError> {
        info!("connecting token blacklist to redis");

        let client = Client::open(config.url.as_str()).map_err(|e| DomainError::Store {
            message: format!("invalid redis URL: {}", e),
        })?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DomainError::Store {
                message: format!("failed to connect to redis: {}", e),
            })?;

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone().unwrap_or_default(),
        })
    }

    fn key_for(&self, token: &str) -> String {
        format!("{}session:blacklist:{}", self.key_prefix, hash_token(token))
    }

    fn store_error(context: &str, e: redis::RedisError) -> DomainError {
        DomainError::Store {
            message: format!("{}: {}", context, e),
        }
    }
}

#[async_trait]
impl TokenBlacklist for RedisTokenBlacklist {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        // Floor of one second keeps already-expired tokens insertable;
        // the entry just evicts almost immediately
        let ttl = (expires_at - Utc::now()).num_seconds().max(1);

        // SET is idempotent, so duplicate logouts simply rewrite the entry
        redis::cmd("SET")
            .arg(self.key_for(token))
            .arg(1)
            .arg("EX")
            .arg(ttl)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| Self::store_error("failed to insert revoked token", e))
    }

    async fn contains(&self, token: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        redis::cmd("EXISTS")
            .arg(self.key_for(token))
            .query_async(&mut conn)
            .await
            .map_err(|e| Self::store_error("failed to check revoked token", e))
    }

    async fn prune(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        // Redis evicts entries by TTL on its own
        Ok(0)
    }
}
