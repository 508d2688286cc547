//! Task operations.

use super::Workspace;
use super::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::project::domain::ProjectId;
use crate::storage::ports::KeyValueStore;
use crate::task::domain::{Task, TaskId};
use crate::team::domain::MemberId;
use crate::workspace::error::WorkspaceResult;
use crate::workspace::reconcile::{self, ReconcileReport};
use crate::workspace::unit_of_work::WorkspaceState;
use mockable::Clock;
use tracing::{debug, warn};

impl<S, C> Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a task.
    ///
    /// The project and assignee are stored as given even when they name no
    /// record; the task counts of those that exist are refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Task`] when the input is
    /// invalid and [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> WorkspaceResult<Task> {
        let (title, changes) = request.validate()?;
        let task = Task::new(title, changes, &*self.clock);

        let mut state = self.lock().await;
        state.tasks.add(task.clone());
        let report = self.refresh_counts(&mut state, &[task.project_id()], &[task.assignee_id()]);
        log_unresolved(task.id(), &report);
        debug!(task_id = %task.id(), "task created");
        self.commit(&mut state).await?;
        Ok(task)
    }

    /// Applies a partial update. Returns `Ok(None)` when the task is absent.
    ///
    /// Changing the project or assignee refreshes the task counts on both
    /// the previous and the new records.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Task`] when the input is
    /// invalid and [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> WorkspaceResult<Option<Task>> {
        let changes = request.validate()?;

        let mut state = self.lock().await;
        let Some(((old_project, old_assignee), after)) = state.tasks.update(task_id, |task| {
            let previous = (task.project_id(), task.assignee_id());
            task.apply(changes, &*self.clock);
            (previous, task.clone())
        }) else {
            debug!(%task_id, "update skipped: task not found");
            return Ok(None);
        };
        let report = self.refresh_counts(
            &mut state,
            &[old_project, after.project_id()],
            &[old_assignee, after.assignee_id()],
        );
        log_unresolved(task_id, &report);
        debug!(%task_id, "task updated");
        self.commit(&mut state).await?;
        Ok(Some(after))
    }

    /// Deletes a task and returns it. Returns `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn delete_task(&self, task_id: TaskId) -> WorkspaceResult<Option<Task>> {
        let mut state = self.lock().await;
        let Some(removed) = state.tasks.remove(task_id) else {
            debug!(%task_id, "delete skipped: task not found");
            return Ok(None);
        };
        let report = self.refresh_counts(
            &mut state,
            &[removed.project_id()],
            &[removed.assignee_id()],
        );
        log_unresolved(task_id, &report);
        debug!(%task_id, "task deleted");
        self.commit(&mut state).await?;
        Ok(Some(removed))
    }

    /// Returns every task in insertion order.
    pub async fn tasks(&self) -> Vec<Task> {
        self.lock().await.tasks().list().to_vec()
    }

    /// Returns the task with `task_id`, if present.
    pub async fn task(&self, task_id: TaskId) -> Option<Task> {
        self.lock().await.tasks().get(task_id).cloned()
    }

    /// Returns the tasks whose project is `project_id`, whether or not that
    /// project exists.
    pub async fn tasks_by_project(&self, project_id: ProjectId) -> Vec<Task> {
        self.lock()
            .await
            .tasks()
            .list()
            .iter()
            .filter(|task| task.project_id() == Some(project_id))
            .cloned()
            .collect()
    }

    /// Returns the tasks assigned to `member_id`.
    pub async fn tasks_by_assignee(&self, member_id: MemberId) -> Vec<Task> {
        self.lock()
            .await
            .tasks()
            .list()
            .iter()
            .filter(|task| task.assignee_id() == Some(member_id))
            .cloned()
            .collect()
    }

    pub(super) fn refresh_counts(
        &self,
        state: &mut WorkspaceState,
        projects: &[Option<ProjectId>],
        members: &[Option<MemberId>],
    ) -> ReconcileReport {
        reconcile::refresh_task_counts(
            state,
            projects.iter().copied(),
            members.iter().copied(),
            &*self.clock,
        )
    }
}

fn log_unresolved(task_id: TaskId, report: &ReconcileReport) {
    for missing in &report.missing {
        warn!(%task_id, %missing, "task refers to a missing record");
    }
}
