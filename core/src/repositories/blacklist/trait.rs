//! Blacklist trait defining the interface for revoked-token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Repository trait for the revoked-token blacklist.
///
/// A blacklisted token must be rejected irrespective of its signature or
/// expiry validity, so every verification path consults this store before
/// trusting anything else about a token.
///
/// # Security Considerations
/// - Implementations hash tokens before storage (see [`super::hash_token`])
/// - A store failure must propagate as [`DomainError::Store`]; it is never
///   reported as "not blacklisted"
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    /// Add a token to the blacklist.
    ///
    /// Idempotent: re-adding a token that is already present is a no-op,
    /// not an error, so duplicate logout requests are harmless.
    ///
    /// # Arguments
    /// * `token` - The exact token string to revoke
    /// * `expires_at` - Expiry of the underlying token, kept so the entry
    ///   can be pruned once the token could no longer be replayed
    async fn add(&self, token: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError>;

    /// Check whether a token has been revoked.
    ///
    /// # Returns
    /// * `Ok(true)` - Token is blacklisted and must be rejected
    /// * `Ok(false)` - Token is not in the blacklist
    /// * `Err(DomainError)` - Store error; callers must fail closed
    async fn contains(&self, token: &str) -> Result<bool, DomainError>;

    /// Remove entries whose underlying token expired before `now`.
    ///
    /// Pruning bounds storage growth only; skipping it never affects
    /// correctness because expired tokens fail verification anyway.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn prune(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
