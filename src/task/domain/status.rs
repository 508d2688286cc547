//! Task status and board column order.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status column a task sits in.
///
/// The variants are ordered as the board shows them, but moves between any
/// two statuses are allowed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not picked up yet.
    #[default]
    NotStarted,
    /// Being worked on.
    InProgress,
    /// Under test.
    Testing,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// Board column order.
    pub const ORDER: [Self; 4] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Testing,
        Self::Completed,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Testing => "testing",
            Self::Completed => "completed",
        }
    }

    /// Returns the human-readable column label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Testing => "Testing",
            Self::Completed => "Completed",
        }
    }

    /// Returns the zero-based column position in [`Self::ORDER`].
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 1,
            Self::Testing => 2,
            Self::Completed => 3,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "testing" => Ok(Self::Testing),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
