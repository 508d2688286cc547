//! TOML configuration for the workspace and the report binary.
//!
//! Every field has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! [storage]
//! backend = "file"
//! directory = ".taskflow"
//! file_name = "state.json"
//!
//! [references]
//! cascade_deletes = true
//! strict_assignments = true
//!
//! [tasks]
//! complete_sets_full_progress = false
//!
//! [logging]
//! filter = "taskflow=debug"
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::io;
use thiserror::Error;

use crate::storage::adapters::{
    ConfiguredStore, DEFAULT_FILE_NAME, FileKeyValueStore, InMemoryKeyValueStore,
};
use crate::storage::ports::StorageResult;
use crate::task::domain::TransitionPolicy;
use crate::workspace::WorkspacePolicy;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid configuration TOML.
    #[error("invalid config file '{path}': {source}")]
    Parse {
        /// Path that was parsed.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The path does not name a file.
    #[error("config path '{0}' does not name a file")]
    NotAFile(Utf8PathBuf),
}

/// Which key-value store backs the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Keep state in memory only.
    Memory,
    /// Keep state in a JSON document on disk.
    #[default]
    File,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Store implementation.
    pub backend: StorageBackend,
    /// Directory holding the state document.
    pub directory: Utf8PathBuf,
    /// Name of the state document inside `directory`.
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: Utf8PathBuf::from(".taskflow"),
            file_name: DEFAULT_FILE_NAME.to_owned(),
        }
    }
}

impl StorageConfig {
    /// Opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::storage::ports::StorageError::Persistence`] when the
    /// file store's directory cannot be created or opened.
    pub fn open(&self) -> StorageResult<ConfiguredStore> {
        match self.backend {
            StorageBackend::Memory => Ok(ConfiguredStore::Memory(InMemoryKeyValueStore::new())),
            StorageBackend::File => {
                FileKeyValueStore::open(&self.directory, self.file_name.clone())
                    .map(ConfiguredStore::File)
            }
        }
    }
}

/// `[references]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Strip deleted projects and members from the records that name them.
    pub cascade_deletes: bool,
    /// Refuse assignments that name a missing record.
    pub strict_assignments: bool,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        let policy = WorkspacePolicy::default();
        Self {
            cascade_deletes: policy.cascade_deletes,
            strict_assignments: policy.strict_assignments,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directives. `RUST_LOG` applies when unset.
    pub filter: Option<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Storage settings.
    pub storage: StorageConfig,
    /// Reference maintenance settings.
    pub references: ReferenceConfig,
    /// Status transition settings.
    pub tasks: TransitionPolicy,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ConfigError::NotAFile(path.to_owned()))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let text = dir.read_to_string(file_name).map_err(read_error)?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Returns the workspace policy these settings describe.
    #[must_use]
    pub const fn policy(&self) -> WorkspacePolicy {
        WorkspacePolicy {
            cascade_deletes: self.references.cascade_deletes,
            strict_assignments: self.references.strict_assignments,
            transition: self.tasks,
        }
    }
}
