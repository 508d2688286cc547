//! Taskflow: project, team and task management over a key-value store.
//!
//! Projects and team members reference each other, and tasks reference
//! both. The workspace keeps those references mirrored and the cached
//! counts consistent, and persists each collection as a JSON array.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Records, validation and status transitions with no
//!   infrastructure dependencies
//! - **Ports**: The [`storage::ports::KeyValueStore`] trait
//! - **Adapters**: In-memory and file-backed stores
//! - **Services**: The [`workspace::Workspace`] that applies every change
//!   together with its reciprocal reference updates
//!
//! # Modules
//!
//! - [`common`]: Value types shared by projects and tasks
//! - [`project`]: Project records
//! - [`team`]: Team member records
//! - [`task`]: Task records, status transitions and the status board
//! - [`storage`]: Key-value persistence port and adapters
//! - [`workspace`]: Collections, reference reconciliation and services
//! - [`config`]: TOML configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod common;
pub mod config;
pub mod project;
pub mod storage;
pub mod task;
pub mod team;
pub mod telemetry;
pub mod workspace;
