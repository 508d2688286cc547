//! Project records.
//!
//! Projects own a name, descriptive metadata, a completion percentage and the
//! list of members assigned to them. Persistence and cross-reference upkeep
//! live in [`crate::workspace`].

pub mod domain;
