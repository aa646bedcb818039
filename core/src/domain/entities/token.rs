//! Token entities for JWT-based session management.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// JWT issuer
pub const JWT_ISSUER: &str = "shelfmark";

/// JWT audience
pub const JWT_AUDIENCE: &str = "shelfmark-api";

/// Intended use of a token, embedded in its claims.
///
/// Purpose binding is the core invariant of the session subsystem: an
/// access token must never be accepted where a refresh token is required,
/// and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    /// Short-lived credential authorizing individual API operations
    Access,
    /// Longer-lived credential used only to mint new access tokens
    Refresh,
}

impl std::fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenPurpose::Access => write!(f, "access"),
            TokenPurpose::Refresh => write!(f, "refresh"),
        }
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID). Defaulted on deserialization so a hostile
    /// token without a subject surfaces as a missing claim rather than
    /// a parse failure.
    #[serde(default)]
    pub sub: String,

    /// Intended use of this token
    pub purpose: TokenPurpose,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a token of the given purpose.
    ///
    /// `jti` is randomized so that two tokens minted within the same
    /// second for the same user remain distinct strings.
    pub fn new(user_id: Uuid, purpose: TokenPurpose, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            purpose,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are currently valid (after nbf, before exp)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Extracts the user ID from the subject claim.
    ///
    /// An absent subject is reported as a missing claim; a subject that
    /// is present but not a UUID is reported as invalid claims.
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        if self.sub.is_empty() {
            return Err(TokenError::MissingClaim {
                claim: "sub".to_string(),
            });
        }
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidClaims)
    }

    /// The expiry instant, if the `exp` timestamp is representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Blacklist entry for a revoked token.
///
/// Only the SHA-256 hash of the token value is kept; `expires_at` is
/// copied from the underlying token so pruning can discard entries whose
/// token could no longer be replayed anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedToken {
    /// SHA-256 hex digest of the exact token string
    pub token_hash: String,

    /// Timestamp when the token was revoked
    pub revoked_at: DateTime<Utc>,

    /// Expiry of the underlying token
    pub expires_at: DateTime<Utc>,
}

impl RevokedToken {
    /// Creates a new blacklist entry revoked as of now
    pub fn new(token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_hash,
            revoked_at: Utc::now(),
            expires_at,
        }
    }

    /// Whether the underlying token would already be rejected for expiry
    /// at `now`, making this entry prunable
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Token pair returned to the client at login and on refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
