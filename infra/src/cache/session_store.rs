//! Redis-backed implementation of the session store.
//!
//! Each session record is written under two keys with the same TTL:
//!
//! - `session:{user_id}:{session_id}` - addressed by identity, used for
//!   per-session deletion and logout enumeration
//! - `refresh:{token_hash}` - addressed by the presented refresh token,
//!   consumed atomically (`GETDEL`) on rotation
//!
//! A record that loses one of its keys (crash between deletes) is bounded
//! by the TTL on the surviving key.

use async_trait::async_trait;
use tracing::{debug, error, warn};
use uuid::Uuid;

use bh_core::domain::entities::session::SessionRecord;
use bh_core::errors::DomainError;
use bh_core::repositories::SessionStore;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// Redis key prefix for identity-addressed session records
const SESSION_KEY_PREFIX: &str = "session";

/// Redis key prefix for token-addressed session records
const TOKEN_KEY_PREFIX: &str = "refresh";

/// Redis-backed session store
pub struct RedisSessionStore {
    /// Redis client for store operations
    client: RedisClient,
    /// TTL applied to session records, the refresh token validity window
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Create a new Redis session store
    ///
    /// # Arguments
    /// * `client` - Connected Redis client
    /// * `ttl_seconds` - Record TTL; must match the refresh token expiry
    pub fn new(client: RedisClient, ttl_seconds: u64) -> Self {
        Self {
            client,
            ttl_seconds,
        }
    }

    /// Format the identity-addressed key for a session
    fn session_key(user_id: Uuid, session_id: Uuid) -> String {
        format!("{}:{}:{}", SESSION_KEY_PREFIX, user_id, session_id)
    }

    /// Format the token-addressed key for a refresh token hash
    fn token_key(token_hash: &str) -> String {
        format!("{}:{}", TOKEN_KEY_PREFIX, token_hash)
    }

    /// Scan pattern matching every session key owned by a user
    fn user_pattern(user_id: Uuid) -> String {
        format!("{}:{}:*", SESSION_KEY_PREFIX, user_id)
    }

    fn encode(record: &SessionRecord) -> Result<String, DomainError> {
        serde_json::to_string(record).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize session record: {}", e),
        })
    }

    fn decode(raw: &str) -> Result<SessionRecord, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::Internal {
            message: format!("Failed to parse session record: {}", e),
        })
    }
}

/// A store outage is a server-side failure, never an authentication failure
fn store_error(err: InfrastructureError) -> DomainError {
    error!("Session store operation failed: {}", err);
    DomainError::StoreUnavailable {
        message: err.to_string(),
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, record: SessionRecord) -> Result<(), DomainError> {
        let payload = Self::encode(&record)?;
        let session_key = Self::session_key(record.user_id, record.session_id);
        let token_key = Self::token_key(&record.token_hash);

        // Identity key first: the token must not become redeemable before
        // the session is enumerable for logout
        self.client
            .set_with_expiry(&session_key, &payload, self.ttl_seconds)
            .await
            .map_err(store_error)?;
        self.client
            .set_with_expiry(&token_key, &payload, self.ttl_seconds)
            .await
            .map_err(store_error)?;

        debug!(
            user_id = %record.user_id,
            session_id = %record.session_id,
            "session record stored"
        );
        Ok(())
    }

    async fn take_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let raw = self
            .client
            .get_del(&Self::token_key(token_hash))
            .await
            .map_err(store_error)?;

        match raw {
            Some(raw) => Ok(Some(Self::decode(&raw)?)),
            None => Ok(None),
        }
    }

    async fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<bool, DomainError> {
        let session_key = Self::session_key(user_id, session_id);

        let raw = self.client.get(&session_key).await.map_err(store_error)?;
        let Some(raw) = raw else {
            return Ok(false);
        };

        // Token key first; if we crash before the session key delete, the
        // token is already unusable and the leftover key expires via TTL
        match Self::decode(&raw) {
            Ok(record) => {
                self.client
                    .delete(&Self::token_key(&record.token_hash))
                    .await
                    .map_err(store_error)?;
            }
            Err(e) => warn!(
                session_key = %session_key,
                error = %e,
                "undecodable session record, deleting key only"
            ),
        }

        self.client
            .delete(&session_key)
            .await
            .map_err(store_error)?;
        Ok(true)
    }

    async fn delete_all_sessions(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let keys = self
            .client
            .scan_keys(&Self::user_pattern(user_id))
            .await
            .map_err(store_error)?;

        let mut deleted = 0;
        for session_key in keys {
            if let Some(raw) = self.client.get(&session_key).await.map_err(store_error)? {
                if let Ok(record) = Self::decode(&raw) {
                    self.client
                        .delete(&Self::token_key(&record.token_hash))
                        .await
                        .map_err(store_error)?;
                }
            }

            if self
                .client
                .delete(&session_key)
                .await
                .map_err(store_error)?
            {
                deleted += 1;
            }
        }

        debug!(user_id = %user_id, sessions = deleted, "deleted all user sessions");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        let user_id = Uuid::nil();
        let session_id = Uuid::nil();

        assert_eq!(
            RedisSessionStore::session_key(user_id, session_id),
            format!("session:{}:{}", user_id, session_id)
        );
        assert_eq!(
            RedisSessionStore::token_key("abc123"),
            "refresh:abc123"
        );
        assert_eq!(
            RedisSessionStore::user_pattern(user_id),
            format!("session:{}:*", user_id)
        );
    }

    #[test]
    fn test_record_round_trip() {
        let record = SessionRecord::new(Uuid::new_v4(), Uuid::new_v4(), "hash".to_string());

        let encoded = RedisSessionStore::encode(&record).unwrap();
        let decoded = RedisSessionStore::decode(&encoded).unwrap();

        assert_eq!(record, decoded);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(RedisSessionStore::decode("not json").is_err());
    }
}
