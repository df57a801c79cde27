use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::{info, warn};

mod app;
mod dto;
mod handlers;
mod middleware;
mod routes;

use app::create_app;
use routes::auth::AppState;

use bh_core::services::auth::{AuthService, AuthServiceConfig};
use bh_core::services::token::{TokenService, TokenServiceConfig};
use bh_infra::cache::{RedisClient, RedisSessionStore};
use bh_infra::database::{create_pool, MySqlUserRepository};
use bh_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting BoilerHub API Server");

    // Load configuration
    let config = AppConfig::from_env();

    if config.auth.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            panic!("JWT secrets must be configured in production");
        }
        warn!("Using default JWT secrets; configure JWT_ACCESS_SECRET and JWT_REFRESH_SECRET");
    }

    // Database pool and repositories
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool));

    // Redis session store
    let redis_client = RedisClient::new(config.cache.clone())
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    if !redis_client.health_check().await.unwrap_or(false) {
        warn!("Redis health check did not return PONG");
    }
    let session_store = Arc::new(RedisSessionStore::new(
        redis_client,
        config.auth.jwt.refresh_token_expiry as u64,
    ));

    // Services
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from_jwt_config(
        &config.auth.jwt,
    )));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        session_store,
        Arc::clone(&token_service),
        AuthServiceConfig {
            bcrypt_cost: config.auth.bcrypt_cost,
        },
    ));

    let app_state = web::Data::new(AppState {
        auth_service,
        cookie: config.auth.cookie.clone(),
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone(), Arc::clone(&token_service)))
        .bind(&bind_address)?
        .run()
        .await
}
