//! Record storage, keyed by username.
//!
//! The service only needs put/get. `InMemoryRecordStore` is what ships; a
//! durable backend implements the same trait and is swapped in at startup.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::StructuredRecord;

#[derive(Debug, Clone, Serialize)]
pub struct StoredRecord {
    pub username: String,
    pub record: StructuredRecord,
    pub updated_at: DateTime<Utc>,
}

/// Carried in `AppState` as `Arc<dyn RecordStore>`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Stores `record` under `username`, replacing any previous record.
    async fn put(&self, username: &str, record: StructuredRecord) -> Result<StoredRecord>;

    async fn get(&self, username: &str) -> Result<Option<StoredRecord>>;
}

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<String, StoredRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, username: &str, record: StructuredRecord) -> Result<StoredRecord> {
        let stored = StoredRecord {
            username: username.to_string(),
            record,
            updated_at: Utc::now(),
        };
        let previous = self
            .records
            .write()
            .await
            .insert(username.to_string(), stored.clone());
        debug!(
            "Stored record for '{username}' (replaced existing: {})",
            previous.is_some()
        );
        Ok(stored)
    }

    async fn get(&self, username: &str) -> Result<Option<StoredRecord>> {
        Ok(self.records.read().await.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_named(name: &str) -> StructuredRecord {
        StructuredRecord {
            name: name.to_string(),
            ..StructuredRecord::default()
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = InMemoryRecordStore::new();
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryRecordStore::new();
        store.put("jane", record_named("Jane Doe")).await.unwrap();
        let stored = store.get("jane").await.unwrap().unwrap();
        assert_eq!(stored.username, "jane");
        assert_eq!(stored.record.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_put_overwrites_previous_record() {
        let store = InMemoryRecordStore::new();
        let first = store.put("jane", record_named("Jane")).await.unwrap();
        let second = store.put("jane", record_named("Jane Doe")).await.unwrap();
        assert!(second.updated_at >= first.updated_at);
        let stored = store.get("jane").await.unwrap().unwrap();
        assert_eq!(stored.record.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_usernames_are_isolated() {
        let store = InMemoryRecordStore::new();
        store.put("jane", record_named("Jane")).await.unwrap();
        store.put("john", record_named("John")).await.unwrap();
        assert_eq!(store.get("jane").await.unwrap().unwrap().record.name, "Jane");
        assert_eq!(store.get("john").await.unwrap().unwrap().record.name, "John");
    }
}
