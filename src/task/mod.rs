//! Task records, status moves and the status board.
//!
//! Tasks reference a project and an assignee by identifier. The move rules
//! in [`domain::TaskMove`] and [`domain::Task::apply_move`] form the status
//! transition engine used by [`crate::workspace`].

pub mod domain;

#[cfg(test)]
mod tests;
