use actix_web::{web, HttpResponse};

use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use bh_core::repositories::{SessionStore, UserRepository};

use super::cookie::clear_refresh_cookie;
use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Logs out a user by deleting every one of their sessions and clearing
/// the refresh cookie. Requires authentication via Bearer token in the
/// Authorization header. Idempotent: logging out with no live sessions
/// succeeds.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 503 Service Unavailable: Session store unreachable
pub async fn logout<U, S>(state: web::Data<AppState<U, S>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    match state.auth_service.logout(auth.user_id).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(clear_refresh_cookie(&state.cookie))
            .json(LogoutResponse {
                message: "Logged out successfully".to_string(),
            }),
        Err(error) => handle_domain_error(&error),
    }
}
