//! Domain-specific error types for authentication and token operations
//!
//! Negative outcomes that could act as an enumeration oracle are kept
//! deliberately coarse: a caller cannot distinguish an unknown email from a
//! wrong password, nor a replayed refresh token from a forged one.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two cases are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Signature failure, unknown token, replay, or subject mismatch.
    /// Collapsed into one kind on the refresh path to avoid oracle leakage.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Access token past its expiry; reported separately so clients know
    /// to call refresh rather than re-authenticate
    #[error("Token expired")]
    TokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid email or password"
        );
        assert_eq!(AuthError::EmailTaken.to_string(), "Email is already registered");
    }

    #[test]
    fn test_token_error_messages() {
        assert_eq!(TokenError::InvalidToken.to_string(), "Invalid or expired token");
        assert_eq!(TokenError::TokenExpired.to_string(), "Token expired");
    }
}
