//! Completion percentage.

use super::InvalidProgress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion percentage in the inclusive range `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Progress(u8);

impl Progress {
    /// No work done.
    pub const NONE: Self = Self(0);

    /// Work finished.
    pub const COMPLETE: Self = Self(100);

    /// Creates a validated completion percentage.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProgress`] when the value exceeds 100.
    pub fn new(value: u16) -> Result<Self, InvalidProgress> {
        match u8::try_from(value) {
            Ok(percent) if percent <= 100 => Ok(Self(percent)),
            _ => Err(InvalidProgress(value)),
        }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns `true` when the percentage is 100.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 == 100
    }
}

impl TryFrom<u16> for Progress {
    type Error = InvalidProgress;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u16 {
    fn from(progress: Progress) -> Self {
        Self::from(progress.0)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
