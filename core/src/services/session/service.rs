//! Session orchestration: refresh and logout pipelines.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair, TokenPurpose};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::{TokenBlacklist, UserDirectory};
use crate::services::token::TokenCodec;

/// Service managing the session lifecycle.
///
/// All collaborators are injected at construction; the service itself
/// holds no mutable state, so it can be shared across workers.
pub struct SessionService<B, U>
where
    B: TokenBlacklist,
    U: UserDirectory,
{
    codec: Arc<TokenCodec>,
    blacklist: Arc<B>,
    users: Arc<U>,
}

impl<B, U> SessionService<B, U>
where
    B: TokenBlacklist,
    U: UserDirectory,
{
    /// Create a new session service
    ///
    /// # Arguments
    ///
    /// * `codec` - Token codec for issuance and verification
    /// * `blacklist` - Persisted set of revoked tokens
    /// * `users` - Directory resolving user ids to existence
    pub fn new(codec: Arc<TokenCodec>, blacklist: Arc<B>, users: Arc<U>) -> Self {
        Self {
            codec,
            blacklist,
            users,
        }
    }

    /// Issues the initial access+refresh pair for a freshly
    /// authenticated user.
    ///
    /// Credential verification happens upstream in the login handler;
    /// by the time this runs the user id is trusted.
    pub fn issue_session(&self, user_id: Uuid) -> DomainResult<TokenPair> {
        let access_token = self.codec.issue(user_id, TokenPurpose::Access)?;
        let refresh_token = self.codec.issue(user_id, TokenPurpose::Refresh)?;

        let config = self.codec.config();
        debug!(%user_id, "session issued");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            config.access_token_expiry,
            config.refresh_token_expiry,
        ))
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The pipeline runs in a fixed order and each step is terminal on
    /// failure; in particular the blacklist answer must come back
    /// negative before the signature is trusted for anything:
    ///
    /// 1. Blacklist check
    /// 2. Signature/expiry verification
    /// 3. Purpose binding
    /// 4. Subject extraction
    /// 5. User existence
    ///
    /// The refresh token is not rotated: the same token is echoed back
    /// and remains usable until its own expiry or explicit logout, so
    /// concurrent refreshes with one token may all succeed. Nothing is
    /// persisted on this path.
    pub async fn refresh_session(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.ensure_not_revoked(refresh_token).await?;

        let claims = self.codec.verify(refresh_token)?;
        ensure_purpose(&claims, TokenPurpose::Refresh)?;
        let user_id = claims.subject()?;
        let user = self.resolve_user(user_id).await?;

        let access_token = self.codec.issue(user.id, TokenPurpose::Access)?;

        debug!(%user_id, "access token refreshed");

        let remaining = claims.exp - Utc::now().timestamp();
        Ok(TokenPair::new(
            access_token,
            refresh_token.to_owned(),
            self.codec.config().access_token_expiry,
            remaining.max(0),
        ))
    }

    /// Revokes both tokens of a session.
    ///
    /// Tokens are blacklisted without strict verification: an expired or
    /// damaged token must still never work again. The two inserts are
    /// independent idempotent operations, so repeating a partially
    /// completed logout is safe.
    pub async fn logout(
        &self,
        user_id: Uuid,
        access_token: &str,
        refresh_token: &str,
    ) -> DomainResult<()> {
        self.revoke(access_token).await?;
        self.revoke(refresh_token).await?;

        info!(%user_id, "session revoked");
        Ok(())
    }

    /// Blacklists a single token value.
    ///
    /// When the expiry cannot be read out of the token, the entry is
    /// retained for the longest lifetime any legitimate token could
    /// still have.
    async fn revoke(&self, token: &str) -> DomainResult<()> {
        let expires_at = self
            .codec
            .peek_expiry(token)
            .unwrap_or_else(|| Utc::now() + self.codec.config().refresh_token_ttl());

        self.blacklist.add(token, expires_at).await
    }

    /// Pipeline step 1: the blacklist answer gates everything after it.
    /// A store failure propagates; it is never read as "not revoked".
    async fn ensure_not_revoked(&self, token: &str) -> DomainResult<()> {
        if self.blacklist.contains(token).await? {
            warn!("refresh rejected: token revoked");
            return Err(TokenError::TokenRevoked.into());
        }
        Ok(())
    }

    /// Pipeline step 5: the referenced user must still exist
    async fn resolve_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(%user_id, "refresh rejected: user no longer exists");
                AuthError::UserNotFound { id: user_id }.into()
            })
    }
}

/// Pipeline step 3: purpose binding
fn ensure_purpose(claims: &Claims, expected: TokenPurpose) -> Result<(), TokenError> {
    if claims.purpose != expected {
        warn!(
            expected = %expected,
            actual = %claims.purpose,
            "token rejected: wrong purpose"
        );
        return Err(TokenError::WrongPurpose {
            expected,
            actual: claims.purpose,
        });
    }
    Ok(())
}
