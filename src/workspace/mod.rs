//! Workspace: the project, team and task stores kept consistent with each
//! other and persisted through a key-value store.
//!
//! - [`collection`]: insertion-ordered stores with dirty tracking
//! - [`reconcile`]: reciprocal membership and cached count maintenance
//! - [`unit_of_work`]: loading and committing the three collections
//! - [`services`]: the [`Workspace`] operations callers use
//! - [`integrity`] and [`summary`]: read-only reports

pub mod collection;
pub mod integrity;
pub mod reconcile;
pub mod services;
pub mod summary;
pub mod unit_of_work;

mod error;
mod policy;

#[cfg(test)]
mod tests;

pub use collection::{Collection, CollectionKey, ProjectStore, Record, TaskStore, TeamStore};
pub use error::{WorkspaceError, WorkspaceResult};
pub use integrity::IntegrityViolation;
pub use policy::WorkspacePolicy;
pub use reconcile::{MissingReference, ReconcileReport};
pub use services::{
    CreateMemberRequest, CreateProjectRequest, CreateTaskRequest, MoveOutcome,
    UpdateMemberRequest, UpdateProjectRequest, UpdateTaskRequest, Workspace,
};
pub use summary::{DashboardSummary, StatusCount};
pub use unit_of_work::WorkspaceState;
