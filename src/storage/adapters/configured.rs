//! Store selected at runtime from configuration.

use async_trait::async_trait;

use super::{FileKeyValueStore, InMemoryKeyValueStore};
use crate::storage::ports::{KeyValueStore, StorageResult};

/// One of the bundled key-value stores.
#[derive(Debug)]
pub enum ConfiguredStore {
    /// Entries kept in process memory.
    Memory(InMemoryKeyValueStore),
    /// Entries kept in a JSON document on disk.
    File(FileKeyValueStore),
}

#[async_trait]
impl KeyValueStore for ConfiguredStore {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            Self::Memory(store) => store.read(key).await,
            Self::File(store) => store.read(key).await,
        }
    }

    async fn write_batch(&self, entries: &[(String, String)]) -> StorageResult<()> {
        match self {
            Self::Memory(store) => store.write_batch(entries).await,
            Self::File(store) => store.write_batch(entries).await,
        }
    }
}
