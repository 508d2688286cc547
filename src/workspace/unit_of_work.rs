//! Workspace state and the change set committed after each operation.
//!
//! An operation mutates the in-memory collections it needs, then the
//! workspace encodes every dirty collection and hands the lot to the store
//! in one `write_batch` call. Collections stay dirty until a batch that
//! contains them succeeds.

use super::collection::{Collection, CollectionKey, ProjectStore, Record, TaskStore, TeamStore};
use super::error::{WorkspaceError, WorkspaceResult};
use crate::storage::ports::KeyValueStore;
use std::sync::Arc;

/// The three collections a workspace owns.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceState {
    pub(crate) projects: ProjectStore,
    pub(crate) members: TeamStore,
    pub(crate) tasks: TaskStore,
}

impl WorkspaceState {
    /// Builds a state from already decoded collections.
    #[must_use]
    pub const fn from_parts(projects: ProjectStore, members: TeamStore, tasks: TaskStore) -> Self {
        Self {
            projects,
            members,
            tasks,
        }
    }

    /// Loads every collection from `store`. Absent keys load as empty.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Persistence`] when the store cannot be read
    /// and [`WorkspaceError::CorruptCollection`] when a blob does not decode.
    pub async fn load<S>(store: &S) -> WorkspaceResult<Self>
    where
        S: KeyValueStore + ?Sized,
    {
        Ok(Self {
            projects: load_collection(store).await?,
            members: load_collection(store).await?,
            tasks: load_collection(store).await?,
        })
    }

    /// Returns the project store.
    #[must_use]
    pub const fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    /// Returns the team store.
    #[must_use]
    pub const fn members(&self) -> &TeamStore {
        &self.members
    }

    /// Returns the task store.
    #[must_use]
    pub const fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    /// Returns `true` when any collection has uncommitted changes.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.projects.is_dirty() || self.members.is_dirty() || self.tasks.is_dirty()
    }

    /// Keys of the collections with uncommitted changes, in load order.
    #[must_use]
    pub fn dirty_keys(&self) -> Vec<CollectionKey> {
        CollectionKey::ALL
            .into_iter()
            .filter(|key| self.is_key_dirty(*key))
            .collect()
    }

    /// Encodes every dirty collection as a `(key, json)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Encode`] when a collection fails to encode.
    pub fn pending_writes(&self) -> WorkspaceResult<Vec<(String, String)>> {
        self.dirty_keys()
            .into_iter()
            .map(|key| {
                let encoded = match key {
                    CollectionKey::Projects => self.projects.encode(),
                    CollectionKey::Tasks => self.tasks.encode(),
                    CollectionKey::TeamMembers => self.members.encode(),
                };
                encoded
                    .map(|json| (key.as_str().to_owned(), json))
                    .map_err(|err| WorkspaceError::Encode {
                        key,
                        source: Arc::new(err),
                    })
            })
            .collect()
    }

    /// Marks the named collections as committed.
    pub(crate) fn mark_committed(&mut self, keys: &[CollectionKey]) {
        for key in keys {
            match key {
                CollectionKey::Projects => self.projects.mark_clean(),
                CollectionKey::Tasks => self.tasks.mark_clean(),
                CollectionKey::TeamMembers => self.members.mark_clean(),
            }
        }
    }

    const fn is_key_dirty(&self, key: CollectionKey) -> bool {
        match key {
            CollectionKey::Projects => self.projects.is_dirty(),
            CollectionKey::Tasks => self.tasks.is_dirty(),
            CollectionKey::TeamMembers => self.members.is_dirty(),
        }
    }
}

async fn load_collection<S, T>(store: &S) -> WorkspaceResult<Collection<T>>
where
    S: KeyValueStore + ?Sized,
    T: Record,
{
    let Some(raw) = store.read(T::KEY.as_str()).await? else {
        return Ok(Collection::default());
    };
    Collection::decode(&raw).map_err(|err| WorkspaceError::CorruptCollection {
        key: T::KEY,
        source: Arc::new(err),
    })
}
