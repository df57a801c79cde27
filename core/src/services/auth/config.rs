//! Configuration for the authentication service.

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt cost factor used when hashing new passwords
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

impl AuthServiceConfig {
    /// Configuration with a low cost factor for fast tests
    pub fn for_tests() -> Self {
        Self { bcrypt_cost: 4 }
    }
}
