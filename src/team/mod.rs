//! Team member records.
//!
//! Members carry the project side of the project/member relationship
//! (`assignedProjects`) along with cached project and task counts.

pub mod domain;
