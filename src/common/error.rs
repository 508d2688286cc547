//! Error types for shared scalar validation and parsing.

use thiserror::Error;

/// Error returned when a completion percentage falls outside `0..=100`.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("progress must be between 0 and 100, got {0}")]
pub struct InvalidProgress(pub u16);

/// Error returned while parsing a priority from persistence or user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
