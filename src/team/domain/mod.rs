//! Domain model for team members.

mod error;
mod ids;
mod member;
mod status;

pub use error::{ParseMemberStatusError, TeamDomainError};
pub use ids::{MemberId, MemberName, MemberRole};
pub use member::{MemberChanges, TeamMember};
pub use status::MemberStatus;
