//! File-backed key-value store.
//!
//! All keys live in one JSON document inside a capability-scoped directory.
//! A batch is committed by writing a sibling temporary file and renaming it
//! over the document, so readers never observe half of a batch.

use async_trait::async_trait;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io;
use std::sync::{Arc, Mutex};

use crate::storage::ports::{KeyValueStore, StorageError, StorageResult};

/// Default name of the state document.
pub const DEFAULT_FILE_NAME: &str = "state.json";

/// Key-value store persisting to a single JSON document on disk.
#[derive(Debug)]
pub struct FileKeyValueStore {
    dir: Dir,
    file_name: String,
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Opens (creating if needed) `directory` and stores state in
    /// `file_name` inside it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Persistence`] when the directory cannot be
    /// created or opened.
    pub fn open(directory: &Utf8Path, file_name: impl Into<String>) -> StorageResult<Self> {
        Dir::create_ambient_dir_all(directory, ambient_authority())
            .map_err(StorageError::persistence)?;
        let dir = Dir::open_ambient_dir(directory, ambient_authority())
            .map_err(StorageError::persistence)?;
        Ok(Self {
            dir,
            file_name: file_name.into(),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the name of the state document.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn temp_file_name(&self) -> String {
        format!(".{}.tmp", self.file_name)
    }

    fn load_document(&self) -> StorageResult<BTreeMap<String, Value>> {
        match self.dir.read_to_string(&self.file_name) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(StorageError::corrupt_document),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(StorageError::persistence(err)),
        }
    }

    fn replace_document(&self, document: &BTreeMap<String, Value>) -> StorageResult<()> {
        let encoded =
            serde_json::to_string_pretty(document).map_err(StorageError::persistence)?;
        let temp = self.temp_file_name();
        self.dir
            .write(&temp, encoded)
            .map_err(StorageError::persistence)?;
        self.dir
            .rename(&temp, &self.dir, &self.file_name)
            .map_err(StorageError::persistence)
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let document = self.load_document()?;
        Ok(document.get(key).map(Value::to_string))
    }

    async fn write_batch(&self, entries: &[(String, String)]) -> StorageResult<()> {
        let _guard = self.write_lock.lock().map_err(|err| {
            StorageError::persistence(io::Error::other(err.to_string()))
        })?;

        let mut document = self.load_document()?;
        for (key, raw) in entries {
            let value: Value =
                serde_json::from_str(raw).map_err(|err| StorageError::InvalidValue {
                    key: key.clone(),
                    source: Arc::new(err),
                })?;
            document.insert(key.clone(), value);
        }
        self.replace_document(&document)
    }
}
