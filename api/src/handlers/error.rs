//! Mapping from domain errors to HTTP responses.
//!
//! The 401 family carries fixed generic messages: the response body never
//! reveals whether an email exists, which check a token failed, or whether
//! a refresh token was replayed.

use actix_web::HttpResponse;

use bh_core::errors::{AuthError, DomainError, TokenError};
use bh_shared::types::response::ErrorResponse;

/// Convert a domain error to the appropriate HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidCredentials => {
                log::warn!("Authentication failed: invalid credentials");
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    "invalid_credentials",
                    "Invalid email or password",
                ))
            }
            AuthError::EmailTaken => HttpResponse::Conflict().json(ErrorResponse::new(
                "email_taken",
                "Email is already registered",
            )),
            // On the refresh path a vanished user means the token is no
            // longer honoured; the caller sees the same generic 401
            AuthError::UserNotFound => {
                log::warn!("Authentication failed: user not found");
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    "invalid_token",
                    "Invalid or expired token",
                ))
            }
        },
        DomainError::Token(token_error) => match token_error {
            TokenError::InvalidToken => {
                log::warn!("Authentication failed: invalid token");
                HttpResponse::Unauthorized().json(ErrorResponse::new(
                    "invalid_token",
                    "Invalid or expired token",
                ))
            }
            TokenError::TokenExpired => HttpResponse::Unauthorized().json(ErrorResponse::new(
                "token_expired",
                "Access token has expired",
            )),
            TokenError::TokenGenerationFailed => {
                log::error!("Token generation failed");
                HttpResponse::InternalServerError().json(ErrorResponse::new(
                    "internal_error",
                    "An internal error occurred",
                ))
            }
        },
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::StoreUnavailable { message } => {
            log::error!("Session store unavailable: {}", message);
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                "service_unavailable",
                "Service temporarily unavailable. Please try again later",
            ))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}

/// Build a 400 response from request validation failures
pub fn handle_validation_errors(errors: &validator::ValidationErrors) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    log::warn!("Request validation failed for fields: {:?}", fields);

    HttpResponse::BadRequest().json(ErrorResponse::new(
        "validation_error",
        format!("Invalid value for: {}", fields.join(", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_auth_failures_map_to_401() {
        let resp = handle_domain_error(&DomainError::Auth(AuthError::InvalidCredentials));
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = handle_domain_error(&DomainError::Token(TokenError::InvalidToken));
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // A missing user on refresh is indistinguishable from a bad token
        let resp = handle_domain_error(&DomainError::Auth(AuthError::UserNotFound));
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_email_taken_maps_to_409() {
        let resp = handle_domain_error(&DomainError::Auth(AuthError::EmailTaken));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_unavailable_maps_to_503() {
        let resp = handle_domain_error(&DomainError::StoreUnavailable {
            message: "connection refused".to_string(),
        });
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
