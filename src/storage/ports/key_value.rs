//! Key-value storage port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage of JSON blobs under string keys.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the blob stored under `key`.
    ///
    /// Returns `None` when nothing has been written under the key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read.
    async fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes every entry as one commit.
    ///
    /// Implementations either persist all entries or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the batch cannot be persisted.
    async fn write_batch(&self, entries: &[(String, String)]) -> StorageResult<()>;

    /// Writes a single entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the entry cannot be persisted.
    async fn write(&self, key: &str, value: String) -> StorageResult<()> {
        self.write_batch(&[(key.to_owned(), value)]).await
    }
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// A value handed to the store is not valid JSON.
    #[error("value for key '{key}' is not valid JSON: {source}")]
    InvalidValue {
        /// Key of the rejected entry.
        key: String,
        /// Decoder failure.
        source: Arc<serde_json::Error>,
    },

    /// The persisted document could not be decoded.
    #[error("persisted document is unreadable: {0}")]
    CorruptDocument(Arc<dyn std::error::Error + Send + Sync>),

    /// Backend failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StorageError {
    /// Wraps a backend error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Wraps a decoding error for the persisted document.
    pub fn corrupt_document(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::CorruptDocument(Arc::new(err))
    }
}
