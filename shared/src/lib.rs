//! Shared utilities and common types for the BoilerHub server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Common response structures

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, CookieConfig, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, ServerConfig,
};
pub use types::{ApiResponse, ErrorResponse};
