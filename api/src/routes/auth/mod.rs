//! Authentication route handlers
//!
//! This module contains all authentication-related endpoints:
//! - User signup and login
//! - Refresh token rotation (cookie-based)
//! - Logout

pub mod cookie;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod signup;

use std::sync::Arc;

use bh_core::repositories::{SessionStore, UserRepository};
use bh_core::services::auth::AuthService;
use bh_shared::config::auth::CookieConfig;

/// Application state that holds shared services
pub struct AppState<U, S>
where
    U: UserRepository,
    S: SessionStore,
{
    pub auth_service: Arc<AuthService<U, S>>,
    pub cookie: CookieConfig,
}
