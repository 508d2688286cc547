//! Workspace service errors.

use super::CollectionKey;
use super::reconcile::MissingReference;
use crate::project::domain::ProjectDomainError;
use crate::storage::ports::StorageError;
use crate::task::domain::TaskDomainError;
use crate::team::domain::TeamDomainError;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by workspace operations.
#[derive(Debug, Clone, Error)]
pub enum WorkspaceError {
    /// Project input failed validation.
    #[error(transparent)]
    Project(#[from] ProjectDomainError),

    /// Team member input failed validation.
    #[error(transparent)]
    Member(#[from] TeamDomainError),

    /// Task input failed validation.
    #[error(transparent)]
    Task(#[from] TaskDomainError),

    /// A creation named memberships with records that do not exist.
    #[error("{} referenced record(s) do not exist", .0.len())]
    MissingReferences(Vec<MissingReference>),

    /// A stored collection is not a JSON array of valid records.
    #[error("stored collection `{key}` could not be decoded: {source}")]
    CorruptCollection {
        /// Key of the offending collection.
        key: CollectionKey,
        /// Decoder error.
        source: Arc<serde_json::Error>,
    },

    /// A collection could not be encoded for storage.
    #[error("collection `{key}` could not be encoded: {source}")]
    Encode {
        /// Key of the offending collection.
        key: CollectionKey,
        /// Encoder error.
        source: Arc<serde_json::Error>,
    },

    /// The key-value store rejected a read or write.
    #[error(transparent)]
    Persistence(#[from] StorageError),
}

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
