//! In-memory key-value store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult};

/// Thread-safe in-memory key-value store.
///
/// Clones share the same entries, so a test can keep a handle and inspect
/// what a workspace persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Returns a copy of every stored entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Persistence`] when the lock is poisoned.
    pub fn snapshot(&self) -> StorageResult<BTreeMap<String, String>> {
        let entries = self.entries.read().map_err(|err| {
            StorageError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|err| {
            StorageError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.get(key).cloned())
    }

    async fn write_batch(&self, batch: &[(String, String)]) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            StorageError::persistence(std::io::Error::other(err.to_string()))
        })?;
        for (key, value) in batch {
            entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryKeyValueStore;
    use crate::storage::ports::KeyValueStore;
    use rstest::rstest;

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn missing_key_reads_as_none() {
        let store = InMemoryKeyValueStore::new();
        let value = store.read("projects").await.expect("read succeeds");
        assert!(value.is_none());
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn batch_writes_are_visible_through_clones() {
        let store = InMemoryKeyValueStore::new();
        let observer = store.clone();

        store
            .write_batch(&[
                ("projects".to_owned(), "[]".to_owned()),
                ("tasks".to_owned(), "[1]".to_owned()),
            ])
            .await
            .expect("write succeeds");

        let snapshot = observer.snapshot().expect("snapshot succeeds");
        assert_eq!(snapshot.get("tasks").map(String::as_str), Some("[1]"));
        assert_eq!(snapshot.len(), 2);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread")]
    async fn single_write_overwrites_previous_value() {
        let store = InMemoryKeyValueStore::with_entries([("teamMembers", "[]")]);

        store
            .write("teamMembers", "[{}]".to_owned())
            .await
            .expect("write succeeds");

        let value = store.read("teamMembers").await.expect("read succeeds");
        assert_eq!(value.as_deref(), Some("[{}]"));
    }
}
