//! Application factory
//!
//! This module provides the factory for creating the Actix-web application
//! with all routes and middleware wired up.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    login::login, logout::logout, refresh::refresh, signup::signup, AppState,
};

use bh_core::repositories::{SessionStore, UserRepository};
use bh_core::services::token::TokenService;

/// Create and configure the application with all dependencies
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
    token_service: Arc<TokenService>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SessionStore + 'static,
{
    // Configure CORS using our custom middleware
    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (order matters: CORS before logging)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/signup", web::post().to(signup::<U, S>))
                    .route("/login", web::post().to(login::<U, S>))
                    .route("/refresh", web::post().to(refresh::<U, S>))
                    .route(
                        "/logout",
                        web::post()
                            .to(logout::<U, S>)
                            .wrap(JwtAuth::new(Arc::clone(&token_service))),
                    ),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "boilerhub-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
