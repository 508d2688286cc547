//! Step definitions shared by the workspace behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
