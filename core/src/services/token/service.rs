//! Token issuance and verification.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{
    AccessClaims, RefreshClaims, TokenPair, JWT_AUDIENCE, JWT_ISSUER,
};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Result of one token issuance: the pair plus the session metadata the
/// caller needs to persist the session record.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    /// The access/refresh token pair
    pub pair: TokenPair,
    /// Session identifier embedded in both tokens
    pub session_id: Uuid,
    /// SHA-256 hex digest of the refresh token value
    pub token_hash: String,
}

/// Service for minting and verifying JWT access and refresh tokens.
///
/// Issuance has no storage side effect: persisting the session record is the
/// caller's step, so the issuer stays a pure leaf over clock and randomness.
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
    algorithm: jsonwebtoken::Algorithm,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let access_encoding = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            access_encoding,
            access_decoding,
            refresh_encoding,
            refresh_decoding,
            validation,
            algorithm: config.algorithm,
        }
    }

    /// Issues a new (access, refresh, session id) triple for a user
    ///
    /// A fresh random session identifier is minted on every call; rotation
    /// therefore retires the previous session id along with the old token.
    ///
    /// # Returns
    /// * `Ok(IssuedTokens)` - The issued pair and session metadata
    /// * `Err(DomainError)` - Token encoding failed
    pub fn issue(&self, user: &User) -> Result<IssuedTokens, DomainError> {
        let session_id = Uuid::new_v4();

        let access_claims = AccessClaims::new(
            user.id,
            user.email.clone(),
            user.role.as_str().to_string(),
            session_id,
        );
        let access_token = self.encode_jwt(&access_claims, &self.access_encoding)?;

        let refresh_claims = RefreshClaims::new(user.id, session_id);
        let refresh_token = self.encode_jwt(&refresh_claims, &self.refresh_encoding)?;

        let token_hash = Self::hash_token(&refresh_token);

        Ok(IssuedTokens {
            pair: TokenPair::new(access_token, refresh_token),
            session_id,
            token_hash,
        })
    }

    /// Verifies an access token and returns its claims
    ///
    /// # Returns
    /// * `Ok(AccessClaims)` - The validated claims
    /// * `Err(DomainError)` - `TokenExpired` for a stale token, otherwise
    ///   `InvalidToken`
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, DomainError> {
        let claims: AccessClaims =
            self.decode_jwt(token, &self.access_decoding).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })?;

        if !claims.is_valid() {
            return Err(TokenError::TokenExpired.into());
        }

        Ok(claims)
    }

    /// Verifies a refresh token's signature and expiry
    ///
    /// Every failure collapses to `InvalidToken`: on the refresh path the
    /// caller must not be able to tell a forged token from an expired one.
    /// Store lookup is a separate step owned by the refresh flow.
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, DomainError> {
        self.decode_jwt(token, &self.refresh_decoding)
            .map_err(|_| TokenError::InvalidToken.into())
    }

    /// Hashes a refresh token value for session store addressing
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn encode_jwt<C: Serialize>(
        &self,
        claims: &C,
        key: &EncodingKey,
    ) -> Result<String, DomainError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, key).map_err(|_| TokenError::TokenGenerationFailed.into())
    }

    fn decode_jwt<C: DeserializeOwned>(
        &self,
        token: &str,
        key: &DecodingKey,
    ) -> Result<C, jsonwebtoken::errors::Error> {
        decode::<C>(token, key, &self.validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::User;
    use chrono::{Duration, Utc};

    fn test_user() -> User {
        User::new(
            "dev@example.com".to_string(),
            "$2b$12$hash".to_string(),
            "Dev".to_string(),
        )
    }

    fn create_test_service() -> TokenService {
        TokenService::new(TokenServiceConfig::default())
    }

    #[test]
    fn test_issue_round_trip() {
        let service = create_test_service();
        let user = test_user();

        let issued = service.issue(&user).unwrap();
        let claims = service.verify_access_token(&issued.pair.access_token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.session_id().unwrap(), issued.session_id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_refresh_round_trip_shares_session_id() {
        let service = create_test_service();
        let user = test_user();

        let issued = service.issue(&user).unwrap();
        let claims = service
            .verify_refresh_token(&issued.pair.refresh_token)
            .unwrap();

        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.session_id().unwrap(), issued.session_id);
    }

    #[test]
    fn test_session_id_rotates_per_issue() {
        let service = create_test_service();
        let user = test_user();

        let first = service.issue(&user).unwrap();
        let second = service.issue(&user).unwrap();

        assert_ne!(first.session_id, second.session_id);
        assert_ne!(first.pair.refresh_token, second.pair.refresh_token);
    }

    #[test]
    fn test_secrets_are_not_interchangeable() {
        let service = create_test_service();
        let user = test_user();
        let issued = service.issue(&user).unwrap();

        // An access token must not verify as a refresh token, and vice versa
        assert!(service.verify_refresh_token(&issued.pair.access_token).is_err());
        assert!(service.verify_access_token(&issued.pair.refresh_token).is_err());
    }

    #[test]
    fn test_verify_invalid_access_token() {
        let service = create_test_service();
        let result = service.verify_access_token("invalid_token");

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_access_token() {
        let service = create_test_service();
        let user = test_user();

        let mut claims = AccessClaims::new(
            user.id,
            user.email.clone(),
            "user".to_string(),
            Uuid::new_v4(),
        );
        claims.iat = (Utc::now() - Duration::hours(2)).timestamp();
        claims.nbf = claims.iat;
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();

        let token = service.encode_jwt(&claims, &service.access_encoding).unwrap();
        let result = service.verify_access_token(&token);

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::TokenExpired)
        ));
    }

    #[test]
    fn test_expired_refresh_token_collapses_to_invalid() {
        let service = create_test_service();
        let user = test_user();

        let mut claims = RefreshClaims::new(user.id, Uuid::new_v4());
        claims.iat = (Utc::now() - Duration::days(8)).timestamp();
        claims.nbf = claims.iat;
        claims.exp = (Utc::now() - Duration::days(1)).timestamp();

        let token = service
            .encode_jwt(&claims, &service.refresh_encoding)
            .unwrap();
        let result = service.verify_refresh_token(&token);

        assert!(matches!(
            result.unwrap_err(),
            DomainError::Token(TokenError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = TokenService::new(TokenServiceConfig::new("other-access", "other-refresh"));
        let user = test_user();

        let issued = other.issue(&user).unwrap();
        assert!(service.verify_access_token(&issued.pair.access_token).is_err());
        assert!(service
            .verify_refresh_token(&issued.pair.refresh_token)
            .is_err());
    }

    #[test]
    fn test_token_hash_is_stable() {
        let hash1 = TokenService::hash_token("token");
        let hash2 = TokenService::hash_token("token");
        let hash3 = TokenService::hash_token("other");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }
}
