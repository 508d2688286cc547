//! Insertion-ordered record collections with dirty tracking.

use crate::project::domain::{Project, ProjectId};
use crate::task::domain::{Task, TaskId};
use crate::team::domain::{MemberId, TeamMember};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Storage key of a persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionKey {
    /// Project records.
    Projects,
    /// Task records.
    Tasks,
    /// Team member records.
    TeamMembers,
}

impl CollectionKey {
    /// Every collection, in load order.
    pub const ALL: [Self; 3] = [Self::Projects, Self::Tasks, Self::TeamMembers];

    /// Returns the key the collection is stored under.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Tasks => "tasks",
            Self::TeamMembers => "teamMembers",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record that lives in a [`Collection`].
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Identifier type.
    type Id: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync;

    /// Key the collection is persisted under.
    const KEY: CollectionKey;

    /// Returns the record identifier.
    fn id(&self) -> Self::Id;
}

impl Record for Project {
    type Id = ProjectId;
    const KEY: CollectionKey = CollectionKey::Projects;

    fn id(&self) -> ProjectId {
        Self::id(self)
    }
}

impl Record for TeamMember {
    type Id = MemberId;
    const KEY: CollectionKey = CollectionKey::TeamMembers;

    fn id(&self) -> MemberId {
        Self::id(self)
    }
}

impl Record for Task {
    type Id = TaskId;
    const KEY: CollectionKey = CollectionKey::Tasks;

    fn id(&self) -> TaskId {
        Self::id(self)
    }
}

/// Records of one type in insertion order.
///
/// Mutations mark the collection dirty; the workspace writes dirty
/// collections in full on commit.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    records: Vec<T>,
    dirty: bool,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            dirty: false,
        }
    }
}

impl<T: Record> Collection<T> {
    /// Wraps records loaded from storage. The result is clean.
    #[must_use]
    pub const fn from_records(records: Vec<T>) -> Self {
        Self {
            records,
            dirty: false,
        }
    }

    /// Returns every record in insertion order.
    #[must_use]
    pub fn list(&self) -> &[T] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record with `id`, if present.
    #[must_use]
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Returns `true` when a record with `id` exists.
    #[must_use]
    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Appends a record.
    pub fn add(&mut self, record: T) {
        self.dirty = true;
        self.records.push(record);
    }

    /// Applies `edit` to the record with `id`.
    ///
    /// Returns `None` without marking the collection dirty when the record
    /// is absent.
    pub fn update<R>(&mut self, id: T::Id, edit: impl FnOnce(&mut T) -> R) -> Option<R> {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        self.dirty = true;
        Some(edit(record))
    }

    /// Applies `edit` to the record with `id`, marking the collection dirty
    /// only when `edit` reports a change.
    ///
    /// Returns `None` when the record is absent.
    pub fn modify(&mut self, id: T::Id, edit: impl FnOnce(&mut T) -> bool) -> Option<bool> {
        let record = self.records.iter_mut().find(|record| record.id() == id)?;
        let changed = edit(record);
        self.dirty |= changed;
        Some(changed)
    }

    /// Removes and returns the record with `id`.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        self.dirty = true;
        Some(self.records.remove(index))
    }

    /// Applies `edit` to every record and returns how many reported a
    /// change. The collection is marked dirty only when something changed.
    pub fn update_each(&mut self, mut edit: impl FnMut(&mut T) -> bool) -> usize {
        let mut changed = 0;
        for record in &mut self.records {
            if edit(record) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }

    /// Returns `true` when the collection changed since the last commit.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Encodes the whole collection as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns the encoder error when a record cannot be serialized.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }

    /// Decodes a JSON array produced by [`Self::encode`].
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the blob is not an array of records.
    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        let records: Vec<T> = serde_json::from_str(raw)?;
        Ok(Self::from_records(records))
    }
}

/// Project store: project records in insertion order.
pub type ProjectStore = Collection<Project>;

/// Team store: member records in insertion order.
pub type TeamStore = Collection<TeamMember>;

/// Task store: task records in insertion order.
pub type TaskStore = Collection<Task>;
