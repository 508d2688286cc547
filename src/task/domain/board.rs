//! Status board view: a project's tasks grouped into status columns.

use super::{Task, TaskStatus};
use crate::project::domain::ProjectId;
use serde::Serialize;

/// One status column of a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    status: TaskStatus,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column's tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Tasks of one project grouped by status in [`TaskStatus::ORDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBoard {
    project_id: Option<ProjectId>,
    columns: Vec<BoardColumn>,
}

impl StatusBoard {
    /// Groups the tasks belonging to `project_id`; other tasks are ignored.
    #[must_use]
    pub fn group<'a>(
        project_id: Option<ProjectId>,
        tasks: impl IntoIterator<Item = &'a Task>,
    ) -> Self {
        let mut columns: Vec<BoardColumn> = TaskStatus::ORDER
            .into_iter()
            .map(|status| BoardColumn {
                status,
                tasks: Vec::new(),
            })
            .collect();

        for task in tasks {
            if task.project_id() != project_id {
                continue;
            }
            if let Some(column) = columns.get_mut(task.status().position()) {
                column.tasks.push(task.clone());
            }
        }

        Self {
            project_id,
            columns,
        }
    }

    /// Returns the project the board shows.
    #[must_use]
    pub const fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    /// Returns the columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns the column for `status`.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.status == status)
    }

    /// Returns the number of tasks on the board.
    #[must_use]
    pub fn total(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Returns the number of tasks in the completed column.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.column(TaskStatus::Completed)
            .map_or(0, |column| column.tasks.len())
    }
}
