//! Token codec: pure JWT create/verify.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use chrono::{DateTime, Utc};

use crate::domain::entities::token::{Claims, TokenPurpose, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, TokenError};

use super::config::TokenConfig;

/// Stateless codec for signed session tokens.
///
/// Issuance and verification are pure CPU-bound cryptography with no
/// shared mutable state, so a single codec can be shared freely across
/// concurrent requests.
pub struct TokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a new codec from configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// The configuration this codec was built with
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Issues a signed token bound to the given purpose.
    ///
    /// The TTL is selected from configuration by purpose: minutes-scale
    /// for access tokens, days-scale for refresh tokens.
    pub fn issue(&self, user_id: Uuid, purpose: TokenPurpose) -> Result<String, DomainError> {
        let ttl = match purpose {
            TokenPurpose::Access => self.config.access_token_ttl(),
            TokenPurpose::Refresh => self.config.refresh_token_ttl(),
        };

        let claims = Claims::new(user_id, purpose, ttl);
        self.encode(&claims)
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The validated claims
    /// * `Err(DomainError::Token(_))` - `TokenExpired`, `InvalidSignature`,
    ///   `TokenNotYetValid`, or `InvalidTokenFormat` for anything that
    ///   cannot be parsed or fails issuer/audience checks
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => {
                        TokenError::TokenNotYetValid
                    }
                    _ => TokenError::InvalidTokenFormat,
                }
            })?;

        // Belt-and-braces expiry check with our own clock
        if !token_data.claims.is_valid() {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(token_data.claims)
    }

    /// Reads the expiry out of a token without verifying it.
    ///
    /// Used only by logout: a token being revoked may already be expired
    /// or damaged, and revocation must still succeed. Returns `None` when
    /// the payload cannot be parsed at all.
    pub fn peek_expiry(&self, token: &str) -> Option<DateTime<Utc>> {
        let mut validation = Validation::new(self.config.algorithm);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).ok()?;
        token_data.claims.expires_at()
    }

    /// Encodes claims into a JWT token
    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_codec() -> TokenCodec {
        TokenCodec::new(TokenConfig::default())
    }

    /// Flips the last character of the signature segment to another
    /// valid base64url character
    fn tamper_signature(token: &str) -> String {
        let mut tampered = token.to_string();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        tampered
    }

    #[test]
    fn test_round_trip_preserves_subject_and_purpose() {
        let codec = create_test_codec();
        let user_id = Uuid::new_v4();

        for purpose in [TokenPurpose::Access, TokenPurpose::Refresh] {
            let token = codec.issue(user_id, purpose).unwrap();
            let claims = codec.verify(&token).unwrap();

            assert_eq!(claims.subject().unwrap(), user_id);
            assert_eq!(claims.purpose, purpose);
        }
    }

    #[test]
    fn test_verify_garbage_token() {
        let codec = create_test_codec();
        let result = codec.verify("definitely-not-a-jwt");

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::InvalidTokenFormat)
        ));
    }

    #[test]
    fn test_verify_expired_token() {
        let codec = create_test_codec();
        let user_id = Uuid::new_v4();

        let mut claims = Claims::new(user_id, TokenPurpose::Access, Duration::minutes(15));
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();

        let token = codec.encode(&claims).unwrap();
        let result = codec.verify(&token);

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_verify_tampered_signature() {
        let codec = create_test_codec();
        let token = codec.issue(Uuid::new_v4(), TokenPurpose::Refresh).unwrap();

        let result = codec.verify(&tamper_signature(&token));

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_not_yet_valid_token() {
        let codec = create_test_codec();
        let user_id = Uuid::new_v4();

        let mut claims = Claims::new(user_id, TokenPurpose::Access, Duration::minutes(15));
        claims.nbf = (Utc::now() + Duration::hours(1)).timestamp();

        let token = codec.encode(&claims).unwrap();
        let result = codec.verify(&token);

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::TokenNotYetValid)
        ));
    }

    #[test]
    fn test_verify_foreign_issuer() {
        let codec = create_test_codec();
        let user_id = Uuid::new_v4();

        let mut claims = Claims::new(user_id, TokenPurpose::Refresh, Duration::days(7));
        claims.iss = "someone-else".to_string();

        let token = codec.encode(&claims).unwrap();
        let result = codec.verify(&token);

        // Issuer mismatch is part of the malformed class
        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::InvalidTokenFormat)
        ));
    }

    #[test]
    fn test_peek_expiry_on_valid_token() {
        let codec = create_test_codec();
        let token = codec.issue(Uuid::new_v4(), TokenPurpose::Refresh).unwrap();
        let claims = codec.verify(&token).unwrap();

        let expiry = codec.peek_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), claims.exp);
    }

    #[test]
    fn test_peek_expiry_on_expired_token() {
        let codec = create_test_codec();
        let user_id = Uuid::new_v4();

        let mut claims = Claims::new(user_id, TokenPurpose::Access, Duration::minutes(15));
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();

        let token = codec.encode(&claims).unwrap();

        // Regular verification refuses the token, but logout can still
        // read its expiry for blacklisting
        assert!(codec.verify(&token).is_err());
        assert_eq!(codec.peek_expiry(&token).unwrap().timestamp(), claims.exp);
    }

    #[test]
    fn test_peek_expiry_ignores_signature() {
        let codec = create_test_codec();
        let token = codec.issue(Uuid::new_v4(), TokenPurpose::Access).unwrap();

        assert!(codec.peek_expiry(&tamper_signature(&token)).is_some());
    }

    #[test]
    fn test_peek_expiry_on_garbage() {
        let codec = create_test_codec();
        assert!(codec.peek_expiry("definitely-not-a-jwt").is_none());
    }

    #[test]
    fn test_access_and_refresh_ttls_differ() {
        let codec = create_test_codec();
        let user_id = Uuid::new_v4();

        let access = codec.issue(user_id, TokenPurpose::Access).unwrap();
        let refresh = codec.issue(user_id, TokenPurpose::Refresh).unwrap();

        let access_claims = codec.verify(&access).unwrap();
        let refresh_claims = codec.verify(&refresh).unwrap();

        assert_eq!(access_claims.exp - access_claims.iat, 900);
        assert_eq!(refresh_claims.exp - refresh_claims.iat, 604800);
    }
}
