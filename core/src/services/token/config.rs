//! Configuration for the token service.

use jsonwebtoken::Algorithm;

use bh_shared::config::auth::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Secret for signing and verifying access tokens
    pub access_secret: String,
    /// Secret for signing and verifying refresh tokens
    pub refresh_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
}

impl TokenServiceConfig {
    /// Create a configuration with the two signing secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Build from the application JWT configuration.
    ///
    /// Unknown algorithm names fall back to HS256 rather than failing
    /// startup with a half-configured signer.
    pub fn from_jwt_config(config: &JwtConfig) -> Self {
        let algorithm = match config.algorithm.as_str() {
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            _ => Algorithm::HS256,
        };

        Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            algorithm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_jwt_config() {
        let jwt = JwtConfig::new("a-secret", "r-secret");
        let config = TokenServiceConfig::from_jwt_config(&jwt);

        assert_eq!(config.access_secret, "a-secret");
        assert_eq!(config.refresh_secret, "r-secret");
        assert_eq!(config.algorithm, Algorithm::HS256);
    }

    #[test]
    fn test_unknown_algorithm_falls_back() {
        let mut jwt = JwtConfig::new("a", "r");
        jwt.algorithm = "RS256".to_string();

        let config = TokenServiceConfig::from_jwt_config(&jwt);
        assert_eq!(config.algorithm, Algorithm::HS256);
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_secret: "access-secret-change-in-production".to_string(),
            refresh_secret: "refresh-secret-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
        }
    }
}
