//! Team member availability.

use super::ParseMemberStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of a team member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    /// Available for work.
    #[default]
    Active,
    /// Temporarily unavailable.
    Away,
    /// No longer taking work.
    Inactive,
}

impl MemberStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Away => "away",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MemberStatus {
    type Error = ParseMemberStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "away" => Ok(Self::Away),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseMemberStatusError(value.to_owned())),
        }
    }
}
