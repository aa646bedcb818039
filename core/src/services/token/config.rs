//! Configuration for the token codec

use chrono::Duration;
use jsonwebtoken::Algorithm;

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// JWT signing secret
    pub secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Access token expiry in seconds
    pub access_token_expiry: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl TokenConfig {
    /// Build from the shared JWT configuration
    pub fn from_jwt_config(config: &sm_shared::config::JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            algorithm: config.algorithm.parse().unwrap_or(Algorithm::HS256),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
        }
    }

    /// Access token lifetime
    pub fn access_token_ttl(&self) -> Duration {
        Duration::seconds(self.access_token_expiry)
    }

    /// Refresh token lifetime
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::seconds(self.refresh_token_expiry)
    }
}
