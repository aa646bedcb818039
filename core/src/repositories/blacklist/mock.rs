//! In-memory implementation of TokenBlacklist for tests and local development

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RevokedToken;
use crate::errors::DomainError;

use super::hash_token;
use super::r#trait::TokenBlacklist;

/// In-memory token blacklist.
///
/// The `fail` switch makes every operation return a store error, which
/// tests use to exercise the fail-closed contract.
pub struct MockTokenBlacklist {
    entries: Arc<RwLock<HashMap<String, RevokedToken>>>,
    fail: Arc<AtomicBool>,
}

impl MockTokenBlacklist {
    /// Create a new empty blacklist
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Toggle the simulated store outage
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the blacklist holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Store {
                message: "blacklist store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockTokenBlacklist {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenBlacklist for MockTokenBlacklist {
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        self.check_available()?;
        let hash = hash_token(token);
        let mut entries = self.entries.write().await;

        // Re-adding keeps the original revocation timestamp
        entries
            .entry(hash.clone())
            .or_insert_with(|| RevokedToken::new(hash, expires_at));
        Ok(())
    }

    async fn contains(&self, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let entries = self.entries.read().await;
        Ok(entries.contains_key(&hash_token(token)))
    }

    async fn prune(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.write().await;
        let initial_count = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        Ok(initial_count - entries.len())
    }
}
