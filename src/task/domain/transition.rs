//! Status moves, including drops on a project status board.
//!
//! Any status may be reached from any other. The only refusal is a board
//! drop that would carry a task into another project's board.

use super::{Task, TaskId, TaskStatus};
use crate::common::Progress;
use crate::project::domain::ProjectId;
use mockable::Clock;
use serde::Deserialize;
use thiserror::Error;

/// Options that change how moves treat progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionPolicy {
    /// Raise progress to 100 whenever a task moves into
    /// [`TaskStatus::Completed`]. Off by default: status and progress are
    /// independently settable.
    pub complete_sets_full_progress: bool,
}

/// Request to move a task into a status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskMove {
    task_id: TaskId,
    destination: TaskStatus,
    board_project: Option<Option<ProjectId>>,
}

impl TaskMove {
    /// Creates a plain status change, as made from a task form.
    #[must_use]
    pub const fn new(task_id: TaskId, destination: TaskStatus) -> Self {
        Self {
            task_id,
            destination,
            board_project: None,
        }
    }

    /// Marks the move as a drop onto the board of `project`.
    #[must_use]
    pub const fn dropped_on(mut self, project: Option<ProjectId>) -> Self {
        self.board_project = Some(project);
        self
    }

    /// Returns the task being moved.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the destination status.
    #[must_use]
    pub const fn destination(&self) -> TaskStatus {
        self.destination
    }

    /// Returns the project whose board received the drop, if this is a
    /// board drop.
    #[must_use]
    pub const fn board_project(&self) -> Option<Option<ProjectId>> {
        self.board_project
    }
}

/// Reason a move was refused. A refused move changes nothing.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MoveRejection {
    /// The drop target belongs to a different project than the task.
    #[error("task {task_id} cannot be dropped onto another project's board")]
    CrossProject {
        /// Task that was dragged.
        task_id: TaskId,
        /// Project the task belongs to.
        task_project: Option<ProjectId>,
        /// Project whose board received the drop.
        board_project: Option<ProjectId>,
    },
}

/// Effect of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The status changed.
    Moved {
        /// Status before the move.
        from: TaskStatus,
        /// Status after the move.
        to: TaskStatus,
    },
    /// The task already had the destination status.
    Unchanged,
}

impl Task {
    /// Applies a status move.
    ///
    /// Progress is left alone unless `policy` asks for completed tasks to be
    /// raised to 100.
    ///
    /// # Errors
    ///
    /// Returns [`MoveRejection::CrossProject`] when a board drop targets a
    /// board other than the task's own project. The task is not modified.
    pub fn apply_move(
        &mut self,
        request: &TaskMove,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<Transition, MoveRejection> {
        if let Some(board_project) = request.board_project()
            && board_project != self.project_id()
        {
            return Err(MoveRejection::CrossProject {
                task_id: self.id(),
                task_project: self.project_id(),
                board_project,
            });
        }

        let from = self.status();
        let to = request.destination();
        if from == to {
            return Ok(Transition::Unchanged);
        }

        self.set_status(to);
        if policy.complete_sets_full_progress && to == TaskStatus::Completed {
            self.set_progress(Some(Progress::COMPLETE));
        }
        self.touch(clock);
        Ok(Transition::Moved { from, to })
    }
}
