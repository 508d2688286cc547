//! Error types for project domain validation and parsing.

use crate::common::InvalidProgress;
use thiserror::Error;

/// Errors returned while constructing or editing project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The progress percentage is out of range.
    #[error(transparent)]
    Progress(#[from] InvalidProgress),
}

/// Error returned while parsing a project status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
