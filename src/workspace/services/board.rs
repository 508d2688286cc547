//! Status board operations.

use super::Workspace;
use crate::project::domain::ProjectId;
use crate::storage::ports::KeyValueStore;
use crate::task::domain::{
    MoveRejection, StatusBoard, Task, TaskId, TaskMove, TaskStatus, Transition,
};
use crate::workspace::error::WorkspaceResult;
use mockable::Clock;
use tracing::{debug, warn};

/// Result of a [`Workspace::move_task`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task changed status.
    Moved {
        /// The task after the move.
        task: Task,
        /// Status the task left.
        from: TaskStatus,
    },
    /// The task already had the destination status.
    Unchanged(Task),
    /// The move broke a board rule and changed nothing.
    Rejected(MoveRejection),
    /// No task has the requested identifier.
    TaskMissing(TaskId),
}

impl MoveOutcome {
    /// Returns the task as it stands after the call, if the move was
    /// accepted.
    #[must_use]
    pub const fn task(&self) -> Option<&Task> {
        match self {
            Self::Moved { task, .. } | Self::Unchanged(task) => Some(task),
            Self::Rejected(_) | Self::TaskMissing(_) => None,
        }
    }
}

impl<S, C> Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Moves a task to another status column.
    ///
    /// A board drop onto a different project's board is rejected and leaves
    /// the task untouched. Progress changes only when the transition policy
    /// raises completed tasks to 100.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn move_task(&self, request: TaskMove) -> WorkspaceResult<MoveOutcome> {
        let task_id = request.task_id();
        let mut state = self.lock().await;
        let Some(current) = state.tasks().get(task_id) else {
            warn!(%task_id, "move skipped: task not found");
            return Ok(MoveOutcome::TaskMissing(task_id));
        };

        let mut task = current.clone();
        let transition = match task.apply_move(&request, self.policy.transition, &*self.clock) {
            Ok(transition) => transition,
            Err(rejection) => {
                warn!(%task_id, %rejection, "move rejected");
                return Ok(MoveOutcome::Rejected(rejection));
            }
        };
        let Transition::Moved { from, to } = transition else {
            return Ok(MoveOutcome::Unchanged(task));
        };

        state.tasks.update(task_id, |stored| *stored = task.clone());
        debug!(%task_id, %from, %to, "task moved");
        self.commit(&mut state).await?;
        Ok(MoveOutcome::Moved { task, from })
    }

    /// Groups the tasks of `project_id` into status columns. `None` shows
    /// the tasks that belong to no project.
    pub async fn board(&self, project_id: Option<ProjectId>) -> StatusBoard {
        StatusBoard::group(project_id, self.lock().await.tasks().list())
    }
}
