//! Session record binding a refresh token to its owning user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-side session state for one refresh token issuance.
///
/// The record is stored in the session store under two keys (by composite
/// `(user_id, session_id)` and by refresh-token hash) with a TTL equal to
/// the refresh token validity window. Rotation replaces the record; logout
/// deletes every record owned by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Owning user identifier
    pub user_id: Uuid,

    /// Session identifier minted at issuance, shared by both tokens
    pub session_id: Uuid,

    /// SHA-256 hex digest of the refresh token value
    pub token_hash: String,

    /// Timestamp when the session was created
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates a new session record
    pub fn new(user_id: Uuid, session_id: Uuid, token_hash: String) -> Self {
        Self {
            user_id,
            session_id,
            token_hash,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_record_creation() {
        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let record = SessionRecord::new(user_id, session_id, "abc123".to_string());

        assert_eq!(record.user_id, user_id);
        assert_eq!(record.session_id, session_id);
        assert_eq!(record.token_hash, "abc123");
    }

    #[test]
    fn test_session_record_serialization() {
        let record = SessionRecord::new(Uuid::new_v4(), Uuid::new_v4(), "hash".to_string());

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: SessionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
