//! Authentication outcome value object.

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Result of a successful login, signup, or refresh.
///
/// Carries the full token pair for the transport layer. The refresh token
/// must only ever leave the server inside the HTTP-only cookie; response
/// bodies are built from the access token and user alone.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    /// The freshly issued token pair
    pub tokens: TokenPair,

    /// The authenticated user
    pub user: User,
}

impl AuthSession {
    /// Creates a new authentication outcome
    pub fn new(tokens: TokenPair, user: User) -> Self {
        Self { tokens, user }
    }

    /// Access token expiry in seconds, as reported to clients
    pub fn expires_in(&self) -> i64 {
        self.tokens.access_expires_in
    }
}
