//! Task aggregate root.

use super::{TaskId, TaskStatus, TaskTitle};
use crate::common::{Priority, Progress};
use crate::project::domain::ProjectId;
use crate::team::domain::MemberId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated field changes applied to a task.
///
/// Nested options distinguish "leave as is" (`None`) from "clear"
/// (`Some(None)`) for nullable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<TaskTitle>,
    /// New description.
    pub description: Option<String>,
    /// New owning project, or `Some(None)` to detach.
    pub project_id: Option<Option<ProjectId>>,
    /// New assignee, or `Some(None)` to unassign.
    pub assignee_id: Option<Option<MemberId>>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New due date, or `Some(None)` to clear it.
    pub due_date: Option<Option<NaiveDate>>,
    /// New progress, or `Some(None)` to clear it.
    pub progress: Option<Option<Progress>>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    #[serde(default)]
    description: String,
    #[serde(default)]
    project_id: Option<ProjectId>,
    #[serde(default)]
    assignee_id: Option<MemberId>,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    progress: Option<Progress>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task in [`TaskStatus::NotStarted`] unless the changes say
    /// otherwise.
    ///
    /// Foreign keys are stored as given; they are not checked against the
    /// project or member collections.
    #[must_use]
    pub fn new(title: TaskTitle, changes: TaskChanges, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let mut task = Self {
            id: TaskId::new(),
            title,
            description: String::new(),
            project_id: None,
            assignee_id: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            due_date: None,
            progress: None,
            created_at: timestamp,
            updated_at: timestamp,
        };
        task.merge(changes);
        task
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<MemberId> {
        self.assignee_id
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the progress, if set.
    #[must_use]
    pub const fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies field changes and refreshes `updated_at`.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        self.merge(changes);
        self.touch(clock);
    }

    /// Drops the project reference. Returns `true` when one was set.
    pub(crate) fn detach_project(&mut self, clock: &impl Clock) -> bool {
        if self.project_id.take().is_none() {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Drops the assignee reference. Returns `true` when one was set.
    pub(crate) fn unassign(&mut self, clock: &impl Clock) -> bool {
        if self.assignee_id.take().is_none() {
            return false;
        }
        self.touch(clock);
        true
    }

    pub(super) fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub(super) fn set_progress(&mut self, progress: Option<Progress>) {
        self.progress = progress;
    }

    pub(super) fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }

    fn merge(&mut self, changes: TaskChanges) {
        let TaskChanges {
            title,
            description,
            project_id,
            assignee_id,
            status,
            priority,
            due_date,
            progress,
        } = changes;

        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = project_id {
            self.project_id = value;
        }
        if let Some(value) = assignee_id {
            self.assignee_id = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
        if let Some(value) = progress {
            self.progress = value;
        }
    }
}
