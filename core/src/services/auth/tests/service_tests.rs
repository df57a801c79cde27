//! End-to-end tests of the signup/login/refresh/logout flows against the
//! in-memory repository and session store.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::domain::entities::token::RefreshClaims;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{MockSessionStore, MockUserRepository, SessionStore, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

struct TestContext {
    service: AuthService<MockUserRepository, MockSessionStore>,
    users: Arc<MockUserRepository>,
    sessions: Arc<MockSessionStore>,
    tokens: Arc<TokenService>,
}

fn setup() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let sessions = Arc::new(MockSessionStore::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));

    let service = AuthService::new(
        Arc::clone(&users),
        Arc::clone(&sessions),
        Arc::clone(&tokens),
        AuthServiceConfig::for_tests(),
    );

    TestContext {
        service,
        users,
        sessions,
        tokens,
    }
}

#[tokio::test]
async fn test_signup_creates_user_and_session() {
    let ctx = setup();

    let session = ctx
        .service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    assert_eq!(session.user.email, "a@x.com");
    assert_eq!(ctx.users.count().await, 1);
    assert_eq!(ctx.sessions.count().await, 1);

    let claims = ctx
        .tokens
        .verify_access_token(&session.tokens.access_token)
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), session.user.id);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let ctx = setup();
    ctx.service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    let result = ctx.service.signup("A@x.com", "other-pass", "Dev2").await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::EmailTaken)
    ));
    assert_eq!(ctx.users.count().await, 1);
}

#[tokio::test]
async fn test_login_returns_tokens_for_valid_credentials() {
    let ctx = setup();
    let created = ctx
        .service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    let session = ctx.service.login("a@x.com", "secret123").await.unwrap();

    let claims = ctx
        .tokens
        .verify_access_token(&session.tokens.access_token)
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), created.user.id);
    assert_eq!(session.expires_in(), 15 * 60);

    let user = ctx.users.find_by_id(created.user.id).await.unwrap().unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let ctx = setup();
    ctx.service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    let wrong = ctx.service.login("a@x.com", "wrong").await.unwrap_err();
    let unknown = ctx.service.login("b@x.com", "secret123").await.unwrap_err();

    assert!(matches!(wrong, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(unknown, DomainError::Auth(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_refresh_rotates_session() {
    let ctx = setup();
    let first = ctx
        .service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    let rotated = ctx
        .service
        .refresh(&first.tokens.refresh_token)
        .await
        .unwrap();

    assert_ne!(rotated.tokens.refresh_token, first.tokens.refresh_token);

    let old_claims = ctx
        .tokens
        .verify_refresh_token(&first.tokens.refresh_token)
        .unwrap();
    let new_claims = ctx
        .tokens
        .verify_refresh_token(&rotated.tokens.refresh_token)
        .unwrap();
    assert_ne!(old_claims.sid, new_claims.sid);

    // Exactly one live session after rotation
    assert_eq!(ctx.sessions.count().await, 1);
}

#[tokio::test]
async fn test_refresh_is_single_use() {
    let ctx = setup();
    let first = ctx
        .service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    ctx.service
        .refresh(&first.tokens.refresh_token)
        .await
        .unwrap();

    let replay = ctx.service.refresh(&first.tokens.refresh_token).await;

    assert!(matches!(
        replay.unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_refresh_with_expired_token_does_not_touch_store() {
    let ctx = setup();
    ctx.service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();
    let sessions_before = ctx.sessions.count().await;

    let mut claims = RefreshClaims::new(Uuid::new_v4(), Uuid::new_v4());
    claims.iat = (Utc::now() - Duration::days(8)).timestamp();
    claims.nbf = claims.iat;
    claims.exp = (Utc::now() - Duration::days(1)).timestamp();

    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("refresh-secret-change-in-production".as_bytes()),
    )
    .unwrap();

    let result = ctx.service.refresh(&expired).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    ));
    assert_eq!(ctx.sessions.count().await, sessions_before);
}

#[tokio::test]
async fn test_refresh_with_fabricated_token_fails_store_lookup() {
    let ctx = setup();

    // Correct secret, well-formed claims, but no session record was ever
    // written for this token
    let claims = RefreshClaims::new(Uuid::new_v4(), Uuid::new_v4());
    let fabricated = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("refresh-secret-change-in-production".as_bytes()),
    )
    .unwrap();

    let result = ctx.service.refresh(&fabricated).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_refresh_rejects_subject_mismatch() {
    let ctx = setup();
    let session = ctx
        .service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    // Overwrite the stored record so it belongs to someone else
    let token_hash = TokenService::hash_token(&session.tokens.refresh_token);
    ctx.sessions
        .put(SessionRecord::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            token_hash,
        ))
        .await
        .unwrap();

    let result = ctx.service.refresh(&session.tokens.refresh_token).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_refresh_for_deleted_user() {
    let ctx = setup();
    let session = ctx
        .service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();

    ctx.users.remove(session.user.id).await;

    let result = ctx.service.refresh(&session.tokens.refresh_token).await;

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_logout_invalidates_all_sessions() {
    let ctx = setup();
    let first = ctx
        .service
        .signup("a@x.com", "secret123", "Dev")
        .await
        .unwrap();
    let second = ctx.service.login("a@x.com", "secret123").await.unwrap();
    assert_eq!(ctx.sessions.count().await, 2);

    ctx.service.logout(first.user.id).await.unwrap();

    let one = ctx.service.refresh(&first.tokens.refresh_token).await;
    let two = ctx.service.refresh(&second.tokens.refresh_token).await;

    assert!(matches!(
        one.unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    ));
    assert!(matches!(
        two.unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let ctx = setup();

    // No sessions exist for this user at all
    let result = ctx.service.logout(Uuid::new_v4()).await;
    assert!(result.is_ok());
}
