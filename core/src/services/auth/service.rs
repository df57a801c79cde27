//! Main authentication service implementation

use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthSession;
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::{SessionStore, UserRepository};
use crate::services::credential::CredentialValidator;
use crate::services::token::{IssuedTokens, TokenService};

use super::config::AuthServiceConfig;

/// Authentication service for signup, login, refresh rotation, and logout
pub struct AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Session store holding live refresh sessions
    session_store: Arc<S>,
    /// Token service for JWT issuance and verification
    token_service: Arc<TokenService>,
    /// Credential validator for login
    credential_validator: CredentialValidator<U>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `session_store` - Store for refresh session records
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        session_store: Arc<S>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        let credential_validator = CredentialValidator::new(Arc::clone(&user_repository));
        Self {
            user_repository,
            session_store,
            token_service,
            credential_validator,
            config,
        }
    }

    /// Register a new user and open their first session
    ///
    /// # Arguments
    ///
    /// * `email` - Email address, stored lowercased, must be unique
    /// * `password` - Plaintext password, hashed with bcrypt before storage
    /// * `display_name` - Name shown on published boilerplates
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - The created user and a fresh token pair
    /// * `Err(DomainError)` - `EmailTaken` on duplicates, or a store error
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> DomainResult<AuthSession> {
        let email = email.trim().to_lowercase();

        // Step 1: Reject duplicate registrations
        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken.into());
        }

        // Step 2: Hash the password and create the user
        let password_hash = bcrypt::hash(password, self.config.bcrypt_cost).map_err(|e| {
            crate::errors::DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            }
        })?;

        let user = self
            .user_repository
            .create(User::new(email, password_hash, display_name.to_string()))
            .await?;

        info!(user_id = %user.id, "user registered");

        // Step 3: Issue tokens and persist the session
        self.open_session(user).await
    }

    /// Authenticate with email/password and open a new session
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - The authenticated user and a fresh token pair
    /// * `Err(DomainError)` - `InvalidCredentials` on no-match
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        // Step 1: Validate credentials (fails closed on any mismatch)
        let user = self.credential_validator.validate(email, password).await?;

        // Step 2: Record the login; losing the timestamp must not fail the login
        if let Err(e) = self.user_repository.update_last_login(user.id).await {
            warn!(user_id = %user.id, error = %e, "failed to record last login");
        }

        info!(user_id = %user.id, "user logged in");

        // Step 3: Issue tokens and persist the session
        self.open_session(user).await
    }

    /// Rotate a refresh token: validate, consume, and re-issue
    ///
    /// The flow is `PRESENTED -> VERIFIED_SIGNATURE -> FOUND_IN_STORE ->
    /// USER_LOADED -> ROTATED`; any failure rejects with an authentication
    /// error and writes no new session state.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - The raw refresh token value presented by the client
    ///
    /// # Returns
    ///
    /// * `Ok(AuthSession)` - A fresh token pair under a new session id
    /// * `Err(DomainError)` - `InvalidToken` for any unusable token,
    ///   `UserNotFound` if the subject no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthSession> {
        // Step 1: Verify signature and expiry before touching the store
        let claims = self.token_service.verify_refresh_token(refresh_token)?;
        let subject = claims
            .user_id()
            .map_err(|_| TokenError::InvalidToken)?;

        // Step 2: Atomically claim the session record. Under concurrent
        // replay of the same token, at most one caller gets the record;
        // the rest observe it already consumed.
        let token_hash = TokenService::hash_token(refresh_token);
        let record = self
            .session_store
            .take_by_token_hash(&token_hash)
            .await?
            .ok_or(TokenError::InvalidToken)?;

        // Step 3: The stored record must belong to the token's subject
        if record.user_id != subject {
            warn!(
                user_id = %subject,
                session_id = %record.session_id,
                "refresh token subject does not match session record"
            );
            return Err(TokenError::InvalidToken.into());
        }

        // Step 4: The subject must still exist
        let user = self
            .user_repository
            .find_by_id(subject)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // Step 5: Retire the old session key; the token key was consumed by
        // the claim above
        self.session_store
            .delete_session(record.user_id, record.session_id)
            .await?;

        debug!(
            user_id = %user.id,
            old_session = %record.session_id,
            "refresh token rotated"
        );

        // Step 6: Issue a replacement pair under a brand-new session id
        self.open_session(user).await
    }

    /// Revoke every session for the user (logout everywhere)
    ///
    /// Idempotent: revoking a user with zero live sessions succeeds.
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        let deleted = self.session_store.delete_all_sessions(user_id).await?;
        info!(user_id = %user_id, sessions = deleted, "user logged out");
        Ok(())
    }

    /// Issue a token pair and write its session record
    async fn open_session(&self, user: User) -> DomainResult<AuthSession> {
        let IssuedTokens {
            pair,
            session_id,
            token_hash,
        } = self.token_service.issue(&user)?;

        self.session_store
            .put(SessionRecord::new(user.id, session_id, token_hash))
            .await?;

        Ok(AuthSession::new(pair, user))
    }
}
