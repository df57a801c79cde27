//! In-memory implementation of SessionStore for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::errors::DomainError;

use super::store::SessionStore;

/// Mock session store backed by a HashMap keyed by token hash.
///
/// `take_by_token_hash` removes the entry under a single write lock, which
/// preserves the claim-at-most-once semantics the Redis implementation gets
/// from `GETDEL`.
pub struct MockSessionStore {
    records: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl MockSessionStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of live session records
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn put(&self, record: SessionRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.token_hash.clone(), record);
        Ok(())
    }

    async fn take_by_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(token_hash))
    }

    async fn delete_session(&self, user_id: Uuid, session_id: Uuid) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        let key = records
            .iter()
            .find(|(_, r)| r.user_id == user_id && r.session_id == session_id)
            .map(|(k, _)| k.clone());

        match key {
            Some(k) => {
                records.remove(&k);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all_sessions(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.user_id != user_id);
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: Uuid, hash: &str) -> SessionRecord {
        SessionRecord::new(user_id, Uuid::new_v4(), hash.to_string())
    }

    #[tokio::test]
    async fn test_take_consumes_record() {
        let store = MockSessionStore::new();
        let user_id = Uuid::new_v4();
        store.put(record(user_id, "hash1")).await.unwrap();

        let first = store.take_by_token_hash("hash1").await.unwrap();
        assert!(first.is_some());

        let second = store.take_by_token_hash("hash1").await.unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_delete_session() {
        let store = MockSessionStore::new();
        let user_id = Uuid::new_v4();
        let rec = record(user_id, "hash1");
        let session_id = rec.session_id;
        store.put(rec).await.unwrap();

        assert!(store.delete_session(user_id, session_id).await.unwrap());
        assert!(!store.delete_session(user_id, session_id).await.unwrap());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_delete_all_sessions() {
        let store = MockSessionStore::new();
        let user_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        store.put(record(user_id, "hash1")).await.unwrap();
        store.put(record(user_id, "hash2")).await.unwrap();
        store.put(record(other, "hash3")).await.unwrap();

        let deleted = store.delete_all_sessions(user_id).await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.count().await, 1);

        // No sessions left is a no-op success
        let deleted = store.delete_all_sessions(user_id).await.unwrap();
        assert_eq!(deleted, 0);
    }
}
