//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the BoilerHub backend.
//! It provides concrete implementations for the interfaces the core layer
//! defines:
//!
//! - **Database**: MySQL user repository using SQLx
//! - **Cache**: Redis client and the Redis-backed session store

// Re-export core error types for convenience
pub use bh_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Cache module - Redis client and the session store
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis session store error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
