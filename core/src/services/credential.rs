//! Credential validation against stored password hashes.

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Well-formed bcrypt hash that matches no real password. Verified when the
/// email is unknown so that path costs the same as a wrong-password check.
const DUMMY_HASH: &str = "$2b$12$abcdefghijklmnopqrstuvabcdefghijklmnopqrstuvwxyzABCDE";

/// Validates email/password pairs against the user repository.
///
/// Fails closed: an unknown email and a wrong password produce the same
/// `InvalidCredentials` outcome, and both paths perform one bcrypt
/// verification. No side effects.
pub struct CredentialValidator<U: UserRepository> {
    user_repository: Arc<U>,
}

impl<U: UserRepository> CredentialValidator<U> {
    /// Create a new credential validator
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// Validate a credential pair, returning the matched user
    ///
    /// # Arguments
    /// * `email` - Email address, matched case-insensitively
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// * `Ok(User)` - Credentials match a stored user
    /// * `Err(DomainError::Auth(InvalidCredentials))` - No match
    pub async fn validate(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = email.trim().to_lowercase();

        match self.user_repository.find_by_email(&email).await? {
            Some(user) => {
                let matches = bcrypt::verify(password, &user.password_hash).map_err(|e| {
                    DomainError::Internal {
                        message: format!("Password verification failed: {}", e),
                    }
                })?;

                if matches {
                    Ok(user)
                } else {
                    Err(AuthError::InvalidCredentials.into())
                }
            }
            None => {
                let _ = bcrypt::verify(password, DUMMY_HASH);
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::User;
    use crate::repositories::MockUserRepository;

    async fn seeded_validator(
        email: &str,
        password: &str,
    ) -> (CredentialValidator<MockUserRepository>, User) {
        let repository = Arc::new(MockUserRepository::new());
        let password_hash = bcrypt::hash(password, 4).unwrap();
        let user = repository
            .create(User::new(
                email.to_string(),
                password_hash,
                "Dev".to_string(),
            ))
            .await
            .unwrap();

        (CredentialValidator::new(repository), user)
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let (validator, user) = seeded_validator("a@x.com", "secret123").await;

        let validated = validator.validate("a@x.com", "secret123").await.unwrap();
        assert_eq!(validated.id, user.id);
    }

    #[tokio::test]
    async fn test_email_case_insensitive() {
        let (validator, user) = seeded_validator("a@x.com", "secret123").await;

        let validated = validator.validate("A@X.COM", "secret123").await.unwrap();
        assert_eq!(validated.id, user.id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_indistinguishable() {
        let (validator, _) = seeded_validator("a@x.com", "secret123").await;

        let wrong_password = validator.validate("a@x.com", "wrong").await.unwrap_err();
        let unknown_email = validator.validate("b@x.com", "secret123").await.unwrap_err();

        assert!(matches!(
            wrong_password,
            DomainError::Auth(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            unknown_email,
            DomainError::Auth(AuthError::InvalidCredentials)
        ));
    }
}
