//! Session store trait defining the interface for refresh session state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::errors::DomainError;

/// Store trait for server-side refresh session records
///
/// Implementations keep one record per live refresh token, addressable both
/// by `(user_id, session_id)` and by the token hash, with an expiry equal to
/// the refresh token validity window.
///
/// # Security Considerations
/// - Raw token values are never stored, only their hashes
/// - `take_by_token_hash` must be atomic: two concurrent calls with the same
///   hash must not both observe the record. This is what makes a refresh
///   token single-use under concurrent replay.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Write a session record under both of its keys
    ///
    /// # Arguments
    /// * `record` - The session record to persist
    ///
    /// # Returns
    /// * `Ok(())` - Record stored with the standard TTL
    /// * `Err(DomainError)` - Store write failed
    async fn put(&self, record: SessionRecord) -> Result<(), DomainError>;

    /// Atomically claim and remove the record for a presented refresh token
    ///
    /// # Arguments
    /// * `token_hash` - SHA-256 hex digest of the refresh token value
    ///
    /// # Returns
    /// * `Ok(Some(SessionRecord))` - Record existed and is now consumed
    /// * `Ok(None)` - No record (never issued, already rotated, or expired)
    /// * `Err(DomainError)` - Store error occurred
    async fn take_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, DomainError>;

    /// Delete one session, removing both of its keys
    ///
    /// # Arguments
    /// * `user_id` - The owning user
    /// * `session_id` - The session to delete
    ///
    /// # Returns
    /// * `Ok(true)` - Session was present and deleted
    /// * `Ok(false)` - Session not found
    /// * `Err(DomainError)` - Store error occurred
    async fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<bool, DomainError>;

    /// Delete every session owned by the user
    ///
    /// Used by logout; deleting zero sessions is a success, not an error.
    ///
    /// # Arguments
    /// * `user_id` - The owning user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of sessions deleted
    /// * `Err(DomainError)` - Store error occurred
    async fn delete_all_sessions(&self, user_id: Uuid) -> Result<usize, DomainError>;
}
