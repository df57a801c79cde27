use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::auth::RefreshResponse;
use crate::handlers::error::handle_domain_error;

use bh_core::errors::{DomainError, TokenError};
use bh_core::repositories::{SessionStore, UserRepository};

use super::cookie::refresh_cookie;
use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Rotates the refresh token presented in the HTTP-only cookie and returns
/// a new access token. The rotated refresh token is delivered by rewriting
/// the cookie; it is never part of the response body.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing cookie, invalid, expired, or replayed token
/// - 503 Service Unavailable: Session store unreachable
pub async fn refresh<U, S>(req: HttpRequest, state: web::Data<AppState<U, S>>) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    let Some(cookie) = req.cookie(&state.cookie.name) else {
        return handle_domain_error(&DomainError::Token(TokenError::InvalidToken));
    };

    match state.auth_service.refresh(cookie.value()).await {
        Ok(session) => {
            let cookie = refresh_cookie(&state.cookie, &session.tokens.refresh_token);
            HttpResponse::Ok().cookie(cookie).json(RefreshResponse {
                access_token: session.tokens.access_token.clone(),
                expires_in: session.expires_in(),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
