//! Dashboard statistics.

use super::unit_of_work::WorkspaceState;
use crate::project::domain::ProjectStatus;
use crate::task::domain::TaskStatus;
use serde::Serialize;

/// Task count for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    /// Status being counted.
    pub status: TaskStatus,
    /// Number of tasks in that status.
    pub count: usize,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Number of projects.
    pub total_projects: usize,
    /// Projects whose status is `active`.
    pub active_projects: usize,
    /// Number of tasks.
    pub total_tasks: usize,
    /// Tasks whose status is `completed`.
    pub completed_tasks: usize,
    /// Number of team members.
    pub total_team_members: usize,
    /// Mean project progress, rounded half up; 0 without projects.
    pub overall_progress: u8,
    /// Task counts per status in board order.
    pub tasks_by_status: Vec<StatusCount>,
}

impl DashboardSummary {
    /// Computes the summary of `state`.
    #[must_use]
    pub fn of(state: &WorkspaceState) -> Self {
        let projects = state.projects().list();
        let tasks = state.tasks().list();

        let tasks_by_status = TaskStatus::ORDER
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: tasks.iter().filter(|task| task.status() == status).count(),
            })
            .collect();

        Self {
            total_projects: projects.len(),
            active_projects: projects
                .iter()
                .filter(|project| project.status() == ProjectStatus::Active)
                .count(),
            total_tasks: tasks.len(),
            completed_tasks: tasks
                .iter()
                .filter(|task| task.status() == TaskStatus::Completed)
                .count(),
            total_team_members: state.members().len(),
            overall_progress: rounded_mean(
                projects.iter().map(|project| project.progress().value()),
            ),
            tasks_by_status,
        }
    }
}

fn rounded_mean(values: impl Iterator<Item = u8>) -> u8 {
    let (sum, count) = values.fold((0_u64, 0_u64), |(total, seen), value| {
        (total + u64::from(value), seen + 1)
    });
    let mean = (sum * 2 + count).checked_div(count * 2).unwrap_or(0);
    u8::try_from(mean).unwrap_or(u8::MAX)
}
