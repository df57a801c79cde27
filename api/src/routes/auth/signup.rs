use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{AuthResponse, SignupRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use bh_core::repositories::{SessionStore, UserRepository};

use super::cookie::refresh_cookie;
use super::AppState;

/// Handler for POST /api/v1/auth/signup
///
/// Registers a new user and opens their first session.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "dev@example.com",
///     "password": "at least 8 chars",
///     "display_name": "Dev"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// Returns `{access_token, expires_in, user}` and sets the refresh cookie.
/// The refresh token appears only in the `Set-Cookie` header.
///
/// ## Errors
/// - 400 Bad Request: Invalid email, password, or display name
/// - 409 Conflict: Email already registered
/// - 503 Service Unavailable: Session store unreachable
pub async fn signup<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<SignupRequest>,
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
        .signup(&request.email, &request.password, &request.display_name)
        .await
    {
        Ok(session) => {
            let cookie = refresh_cookie(&state.cookie, &session.tokens.refresh_token);
            HttpResponse::Created()
                .cookie(cookie)
                .json(AuthResponse::from_session(&session))
        }
        Err(error) => handle_domain_error(&error),
    }
}
