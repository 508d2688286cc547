//! Domain model for tasks and their status moves.

mod board;
mod error;
mod ids;
mod status;
mod task;
mod transition;

pub use board::{BoardColumn, StatusBoard};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, TaskTitle};
pub use status::TaskStatus;
pub use task::{Task, TaskChanges};
pub use transition::{MoveRejection, TaskMove, Transition, TransitionPolicy};
