use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponse, LoginRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use bh_core::repositories::{SessionStore, UserRepository};

use super::cookie::refresh_cookie;
use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates a user with email and password.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "dev@example.com",
///     "password": "secret123"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// Returns `{access_token, expires_in, user}` and sets the refresh cookie.
///
/// ## Errors
/// - 400 Bad Request: Malformed email or empty password
/// - 401 Unauthorized: Unknown email or wrong password (indistinguishable)
/// - 503 Service Unavailable: Session store unreachable
pub async fn login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(session) => {
            let cookie = refresh_cookie(&state.cookie, &session.tokens.refresh_token);
            HttpResponse::Ok()
                .cookie(cookie)
                .json(AuthResponse::from_session(&session))
        }
        Err(error) => handle_domain_error(&error),
    }
}
