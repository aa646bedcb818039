//! Tests for the session refresh/logout pipelines

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPurpose};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockTokenBlacklist, MockUserDirectory, TokenBlacklist};
use crate::services::session::SessionService;
use crate::services::token::{TokenCodec, TokenConfig};

type TestService = SessionService<MockTokenBlacklist, MockUserDirectory>;

struct TestHarness {
    service: TestService,
    codec: Arc<TokenCodec>,
    blacklist: Arc<MockTokenBlacklist>,
    users: Arc<MockUserDirectory>,
}

fn create_harness() -> TestHarness {
    let codec = Arc::new(TokenCodec::new(TokenConfig::default()));
    let blacklist = Arc::new(MockTokenBlacklist::new());
    let users = Arc::new(MockUserDirectory::new());

    TestHarness {
        service: SessionService::new(codec.clone(), blacklist.clone(), users.clone()),
        codec,
        blacklist,
        users,
    }
}

async fn register_user(harness: &TestHarness, name: &str) -> Uuid {
    harness.users.insert(User::new(name)).await
}

#[tokio::test]
async fn test_refresh_mints_new_access_token() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Ada").await;

    let pair = harness.service.issue_session(user_id).unwrap();
    let refreshed = harness
        .service
        .refresh_session(&pair.refresh_token)
        .await
        .unwrap();

    // The new access token is valid and access-bound
    let claims = harness.codec.verify(&refreshed.access_token).unwrap();
    assert_eq!(claims.purpose, TokenPurpose::Access);
    assert_eq!(claims.subject().unwrap(), user_id);

    // Configured access TTL is reported, and the refresh token comes
    // back unchanged
    assert_eq!(refreshed.access_expires_in, 900);
    assert_eq!(refreshed.refresh_token, pair.refresh_token);
    assert_ne!(refreshed.access_token, pair.access_token);
}

#[tokio::test]
async fn test_refresh_rejects_unparsable_token() {
    let harness = create_harness();

    let result = harness.service.refresh_session("not even close to a jwt").await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidTokenFormat)
    ));
}

#[tokio::test]
async fn test_refresh_rejects_logged_out_session() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Grace").await;

    let pair = harness.service.issue_session(user_id).unwrap();
    harness
        .service
        .logout(user_id, &pair.access_token, &pair.refresh_token)
        .await
        .unwrap();

    // Both tokens were recorded
    assert!(harness.blacklist.contains(&pair.access_token).await.unwrap());
    assert!(harness.blacklist.contains(&pair.refresh_token).await.unwrap());

    // The refresh token still carries a valid signature, but the
    // blacklist wins
    assert!(harness.codec.verify(&pair.refresh_token).is_ok());
    let result = harness.service.refresh_session(&pair.refresh_token).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::TokenRevoked)
    ));
}

#[tokio::test]
async fn test_refresh_rejects_deleted_user() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Linus").await;

    let pair = harness.service.issue_session(user_id).unwrap();
    harness.users.remove(user_id).await;

    let result = harness.service.refresh_session(&pair.refresh_token).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::UserNotFound { id }) if id == user_id
    ));
}

#[tokio::test]
async fn test_concurrent_refresh_without_rotation() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Margaret").await;

    let pair = harness.service.issue_session(user_id).unwrap();

    // The refresh token is not rotated, so both concurrent exchanges
    // succeed and each mints an independent access token
    let (first, second) = tokio::join!(
        harness.service.refresh_session(&pair.refresh_token),
        harness.service.refresh_session(&pair.refresh_token),
    );

    let first = first.unwrap();
    let second = second.unwrap();

    assert_ne!(first.access_token, second.access_token);
    assert_eq!(first.refresh_token, pair.refresh_token);
    assert_eq!(second.refresh_token, pair.refresh_token);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Barbara").await;

    let pair = harness.service.issue_session(user_id).unwrap();

    // An otherwise valid, unexpired access token must not pass where a
    // refresh token is required
    let result = harness.service.refresh_session(&pair.access_token).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::WrongPurpose {
            expected: TokenPurpose::Refresh,
            actual: TokenPurpose::Access,
        })
    ));
}

#[tokio::test]
async fn test_refresh_rejects_expired_refresh_token() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Edsger").await;

    let mut claims = Claims::new(user_id, TokenPurpose::Refresh, Duration::days(7));
    claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
    let expired = harness.codec.encode(&claims).unwrap();

    let result = harness.service.refresh_session(&expired).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::TokenExpired)
    ));
}

#[tokio::test]
async fn test_blacklist_is_checked_before_verification() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Donald").await;

    // A token that is both expired and blacklisted reports the
    // blacklist hit: revocation is checked first
    let mut claims = Claims::new(user_id, TokenPurpose::Refresh, Duration::days(7));
    claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
    let token = harness.codec.encode(&claims).unwrap();

    harness
        .blacklist
        .add(&token, Utc::now() + Duration::days(7))
        .await
        .unwrap();

    let result = harness.service.refresh_session(&token).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::TokenRevoked)
    ));
}

#[tokio::test]
async fn test_refresh_rejects_missing_subject() {
    let harness = create_harness();

    let mut claims = Claims::new(Uuid::new_v4(), TokenPurpose::Refresh, Duration::days(7));
    claims.sub = String::new();
    let token = harness.codec.encode(&claims).unwrap();

    let result = harness.service.refresh_session(&token).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::MissingClaim { claim }) if claim == "sub"
    ));
}

#[tokio::test]
async fn test_refresh_persists_nothing() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Ada").await;

    let pair = harness.service.issue_session(user_id).unwrap();
    harness
        .service
        .refresh_session(&pair.refresh_token)
        .await
        .unwrap();

    assert!(harness.blacklist.is_empty().await);
}

#[tokio::test]
async fn test_refresh_fails_closed_on_store_outage() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Grace").await;

    let pair = harness.service.issue_session(user_id).unwrap();
    harness.blacklist.set_fail(true);

    // A store failure is never treated as "not blacklisted"
    let result = harness.service.refresh_session(&pair.refresh_token).await;

    assert!(matches!(result.unwrap_err(), DomainError::Store { .. }));
}

#[tokio::test]
async fn test_logout_fails_closed_on_store_outage() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Grace").await;

    let pair = harness.service.issue_session(user_id).unwrap();
    harness.blacklist.set_fail(true);

    let result = harness
        .service
        .logout(user_id, &pair.access_token, &pair.refresh_token)
        .await;

    assert!(matches!(result.unwrap_err(), DomainError::Store { .. }));
}

#[tokio::test]
async fn test_repeated_logout_is_harmless() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Margaret").await;

    let pair = harness.service.issue_session(user_id).unwrap();

    for _ in 0..2 {
        harness
            .service
            .logout(user_id, &pair.access_token, &pair.refresh_token)
            .await
            .unwrap();
    }

    assert_eq!(harness.blacklist.len().await, 2);
}

#[tokio::test]
async fn test_logout_accepts_expired_and_damaged_tokens() {
    let harness = create_harness();
    let user_id = register_user(&harness, "Edsger").await;

    let mut claims = Claims::new(user_id, TokenPurpose::Access, Duration::minutes(15));
    claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
    let expired = harness.codec.encode(&claims).unwrap();

    // Neither token verifies, yet both must be recorded so the exact
    // values can never work again
    harness
        .service
        .logout(user_id, &expired, "mangled-beyond-recognition")
        .await
        .unwrap();

    assert!(harness.blacklist.contains(&expired).await.unwrap());
    assert!(harness
        .blacklist
        .contains("mangled-beyond-recognition")
        .await
        .unwrap());
}
