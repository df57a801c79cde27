//! Token entities for JWT-based authentication.
//!
//! Access and refresh tokens carry fixed, separately defined claim sets.
//! Both embed the session identifier (`sid`) minted at issuance so a
//! token pair can be tied back to its server-side session record.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "boilerhub";

/// JWT audience
pub const JWT_AUDIENCE: &str = "boilerhub-api";

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the user
    pub email: String,

    /// Role of the user ("user" or "admin")
    pub role: String,

    /// Session identifier shared with the paired refresh token
    pub sid: String,

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

impl AccessClaims {
    /// Creates claims for a new access token bound to `session_id`
    pub fn new(
        user_id: Uuid,
        email: String,
        role: String,
        session_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES);

        Self {
            sub: user_id.to_string(),
            email,
            role,
            sid: session_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims are valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the session ID from the claims
    pub fn session_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sid)
    }
}

/// Claims carried by a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Session identifier shared with the paired access token
    pub sid: String,

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

impl RefreshClaims {
    /// Creates claims for a new refresh token bound to `session_id`
    pub fn new(user_id: Uuid, session_id: Uuid) -> Self {
        let now = Utc::now();
        let expiry = now + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS);

        Self {
            sub: user_id.to_string(),
            sid: session_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Gets the session ID from the claims
    pub fn session_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sid)
    }
}

/// Token pair produced by a successful issuance
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
    /// Creates a new token pair with the standard expiry windows
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            refresh_expires_in: REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let claims = AccessClaims::new(
            user_id,
            "dev@example.com".to_string(),
            "user".to_string(),
            session_id,
        );

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.sid, session_id.to_string());
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert_eq!(claims.role, "user");
        assert!(claims.is_valid());
    }

    #[test]
    fn test_refresh_claims() {
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let claims = RefreshClaims::new(user_id, session_id);

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.session_id().unwrap(), session_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_access_claims_expiration() {
        let mut claims = AccessClaims::new(
            Uuid::new_v4(),
            "dev@example.com".to_string(),
            "user".to_string(),
            Uuid::new_v4(),
        );

        claims.exp = Utc::now().timestamp() - 1;
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_access_claims_not_before() {
        let mut claims = AccessClaims::new(
            Uuid::new_v4(),
            "dev@example.com".to_string(),
            "user".to_string(),
            Uuid::new_v4(),
        );

        claims.nbf = Utc::now().timestamp() + 3600;
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string());

        assert_eq!(pair.access_expires_in, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
        assert_eq!(pair.refresh_expires_in, REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_claims_serialization() {
        let claims = RefreshClaims::new(Uuid::new_v4(), Uuid::new_v4());

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: RefreshClaims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
