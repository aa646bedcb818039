//! Periodic maintenance of the revocation blacklist.
//!
//! Entries whose underlying token has expired can never be replayed, so
//! they are deleted on a schedule to bound storage growth. Skipping a
//! cycle never affects correctness.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::TokenBlacklist;

/// Configuration for the blacklist pruner
#[derive(Debug, Clone)]
pub struct PrunerConfig {
    /// How often to run pruning (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic pruning
    pub enabled: bool,
}

impl Default for PrunerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service deleting expired entries from the blacklist
pub struct BlacklistPruner<B: TokenBlacklist + 'static> {
    blacklist: Arc<B>,
    config: PrunerConfig,
}

impl<B: TokenBlacklist> BlacklistPruner<B> {
    /// Create a new pruner
    pub fn new(blacklist: Arc<B>, config: PrunerConfig) -> Self {
        Self { blacklist, config }
    }

    /// Run a single pruning cycle
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    /// * `Err(DomainError)` - If the store could not be reached
    pub async fn run_once(&self) -> DomainResult<usize> {
        let removed = self.blacklist.prune(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "pruned expired blacklist entries");
        }
        Ok(removed)
    }

    /// Start the pruner as a background task.
    ///
    /// Spawns a tokio task that runs pruning at the configured interval.
    /// Failures are logged and the loop keeps going; request correctness
    /// does not depend on pruning.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("blacklist pruner is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "blacklist pruner started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_once().await {
                    error!("blacklist pruning cycle failed: {}", e);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockTokenBlacklist;
    use chrono::Duration;

    #[tokio::test]
    async fn test_run_once_removes_expired_entries() {
        let blacklist = Arc::new(MockTokenBlacklist::new());
        blacklist
            .add("stale", Utc::now() - Duration::hours(1))
            .await
            .unwrap();
        blacklist
            .add("live", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        let pruner = BlacklistPruner::new(blacklist.clone(), PrunerConfig::default());
        let removed = pruner.run_once().await.unwrap();

        assert_eq!(removed, 1);
        assert!(blacklist.contains("live").await.unwrap());
    }

    #[tokio::test]
    async fn test_run_once_propagates_store_errors() {
        let blacklist = Arc::new(MockTokenBlacklist::new());
        blacklist.set_fail(true);

        let pruner = BlacklistPruner::new(blacklist, PrunerConfig::default());

        assert!(pruner.run_once().await.is_err());
    }
}
