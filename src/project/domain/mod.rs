//! Domain model for projects.
//!
//! A project carries its own descriptive fields plus the member side of the
//! project/member relationship and two cached counts. Membership and counts
//! are only changed through crate-internal methods so that the workspace
//! reconciler stays the single writer of cross-references.

mod error;
mod ids;
mod project;
mod status;

pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use ids::{ProjectId, ProjectName};
pub use project::{Project, ProjectChanges};
pub use status::ProjectStatus;
