//! Project aggregate and its partial-update parameter object.

use super::{ProjectId, ProjectName, ProjectStatus};
use crate::common::{Priority, Progress};
use crate::team::domain::MemberId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated field changes applied to a project.
///
/// `None` leaves a field untouched. The nested options on dates distinguish
/// "leave as is" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    /// New display name.
    pub name: Option<ProjectName>,
    /// New free-form description.
    pub description: Option<String>,
    /// New completion percentage.
    pub progress: Option<Progress>,
    /// New lifecycle status.
    pub status: Option<ProjectStatus>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New start date, or `Some(None)` to clear it.
    pub start_date: Option<Option<NaiveDate>>,
    /// New due date, or `Some(None)` to clear it.
    pub due_date: Option<Option<NaiveDate>>,
}

impl ProjectChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.progress.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    #[serde(default)]
    description: String,
    #[serde(default)]
    progress: Progress,
    #[serde(default)]
    status: ProjectStatus,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    assigned_members: Vec<MemberId>,
    #[serde(rename = "team", default)]
    team_size: usize,
    #[serde(rename = "tasks", default)]
    task_count: usize,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a project with a fresh identifier, no members and no tasks.
    #[must_use]
    pub fn new(name: ProjectName, changes: ProjectChanges, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        let mut project = Self {
            id: ProjectId::new(),
            name,
            description: String::new(),
            progress: Progress::NONE,
            status: ProjectStatus::default(),
            priority: Priority::default(),
            start_date: None,
            due_date: None,
            assigned_members: Vec::new(),
            team_size: 0,
            task_count: 0,
            created_at: timestamp,
            updated_at: timestamp,
        };
        project.merge(changes);
        project
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the start date, if set.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date, if set.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the assigned member identifiers in assignment order.
    #[must_use]
    pub fn assigned_members(&self) -> &[MemberId] {
        &self.assigned_members
    }

    /// Returns `true` when the member is assigned to this project.
    #[must_use]
    pub fn has_member(&self, member_id: MemberId) -> bool {
        self.assigned_members.contains(&member_id)
    }

    /// Returns the cached member count (persisted as `team`).
    #[must_use]
    pub const fn team_size(&self) -> usize {
        self.team_size
    }

    /// Returns the cached task count (persisted as `tasks`).
    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.task_count
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
    pub fn apply(&mut self, changes: ProjectChanges, clock: &impl Clock) {
        self.merge(changes);
        self.touch(clock);
    }

    /// Appends a member unless already present and recomputes the team size.
    ///
    /// Returns `true` when the member list or the cached count changed.
    pub(crate) fn add_member(&mut self, member_id: MemberId, clock: &impl Clock) -> bool {
        if !self.has_member(member_id) {
            self.assigned_members.push(member_id);
        }
        self.sync_team_size(clock)
    }

    /// Removes every occurrence of a member and recomputes the team size.
    ///
    /// Returns `true` when the member list or the cached count changed.
    pub(crate) fn remove_member(&mut self, member_id: MemberId, clock: &impl Clock) -> bool {
        let before = self.assigned_members.len();
        self.assigned_members.retain(|id| *id != member_id);
        let removed = self.assigned_members.len() != before;
        let recounted = self.sync_team_size(clock);
        if removed && !recounted {
            self.touch(clock);
        }
        removed || recounted
    }

    /// Drops duplicate member ids and those rejected by `keep`, then
    /// recomputes the team size. Returns `true` when anything changed.
    pub(crate) fn retain_members(
        &mut self,
        mut keep: impl FnMut(MemberId) -> bool,
        clock: &impl Clock,
    ) -> bool {
        let before = self.assigned_members.clone();
        let mut seen = Vec::with_capacity(before.len());
        self.assigned_members.retain(|id| {
            if seen.contains(id) || !keep(*id) {
                return false;
            }
            seen.push(*id);
            true
        });
        let pruned = self.assigned_members != before;
        let recounted = self.sync_team_size(clock);
        if pruned && !recounted {
            self.touch(clock);
        }
        pruned || recounted
    }

    fn sync_team_size(&mut self, clock: &impl Clock) -> bool {
        let size = self.assigned_members.len();
        if self.team_size == size {
            return false;
        }
        self.team_size = size;
        self.touch(clock);
        true
    }

    /// Overwrites the cached task count. Returns `true` when it changed.
    pub(crate) fn set_task_count(&mut self, count: usize, clock: &impl Clock) -> bool {
        if self.task_count == count {
            return false;
        }
        self.task_count = count;
        self.touch(clock);
        true
    }

    fn merge(&mut self, changes: ProjectChanges) {
        let ProjectChanges {
            name,
            description,
            progress,
            status,
            priority,
            start_date,
            due_date,
        } = changes;

        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = progress {
            self.progress = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = priority {
            self.priority = value;
        }
        if let Some(value) = start_date {
            self.start_date = value;
        }
        if let Some(value) = due_date {
            self.due_date = value;
        }
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
