//! Error types for task validation and parsing.

use crate::common::InvalidProgress;
use thiserror::Error;

/// Errors returned while constructing or editing task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The progress percentage is out of range.
    #[error(transparent)]
    Progress(#[from] InvalidProgress),
}

/// Error returned while parsing a task status from persistence or a board
/// column identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
