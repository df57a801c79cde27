use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use bh_core::domain::entities::user::User;
use bh_core::domain::value_objects::AuthSession;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address used as the login identity
    #[validate(email)]
    pub email: String,

    /// Plaintext password, hashed server-side before storage
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Name shown on published boilerplates
    #[validate(length(min = 1, max = 64))]
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Response for signup and login.
///
/// The refresh token is delivered exclusively through the HTTP-only cookie
/// and intentionally has no field here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: UserDto,
}

impl AuthResponse {
    pub fn from_session(session: &AuthSession) -> Self {
        Self {
            access_token: session.tokens.access_token.clone(),
            expires_in: session.expires_in(),
            user: UserDto::from(&session.user),
        }
    }
}

/// Response for a successful refresh; the rotated refresh token travels in
/// the rewritten cookie only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
