//! Team member aggregate.

use super::{MemberId, MemberName, MemberRole, MemberStatus};
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated field changes applied to a team member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberChanges {
    /// New full name.
    pub name: Option<MemberName>,
    /// New job role.
    pub role: Option<MemberRole>,
    /// New contact email.
    pub email: Option<String>,
    /// New availability.
    pub status: Option<MemberStatus>,
    /// New per-project role override, or `Some(None)` to clear it.
    pub project_role: Option<Option<String>>,
}

/// Team member aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    id: MemberId,
    name: MemberName,
    role: MemberRole,
    #[serde(default)]
    email: String,
    #[serde(default)]
    status: MemberStatus,
    #[serde(rename = "tasks", default)]
    task_count: usize,
    #[serde(rename = "projects", default)]
    project_count: usize,
    #[serde(default)]
    assigned_projects: Vec<ProjectId>,
    #[serde(default)]
    project_role: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TeamMember {
    /// Creates an active member with no project assignments.
    #[must_use]
    pub fn new(
        name: MemberName,
        role: MemberRole,
        changes: MemberChanges,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let mut member = Self {
            id: MemberId::new(),
            name,
            role,
            email: String::new(),
            status: MemberStatus::default(),
            task_count: 0,
            project_count: 0,
            assigned_projects: Vec::new(),
            project_role: None,
            created_at: timestamp,
            updated_at: timestamp,
        };
        member.merge(changes);
        member
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> MemberId {
        self.id
    }

    /// Returns the full name.
    #[must_use]
    pub const fn name(&self) -> &MemberName {
        &self.name
    }

    /// Returns the job role.
    #[must_use]
    pub const fn role(&self) -> &MemberRole {
        &self.role
    }

    /// Returns the contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the availability.
    #[must_use]
    pub const fn status(&self) -> MemberStatus {
        self.status
    }

    /// Returns the per-project role override, if any.
    #[must_use]
    pub fn project_role(&self) -> Option<&str> {
        self.project_role.as_deref()
    }

    /// Returns the role shown on project pages: the override when set,
    /// otherwise the job role.
    #[must_use]
    pub fn display_role(&self) -> &str {
        self.project_role().unwrap_or_else(|| self.role.as_str())
    }

    /// Returns the assigned project identifiers in assignment order.
    #[must_use]
    pub fn assigned_projects(&self) -> &[ProjectId] {
        &self.assigned_projects
    }

    /// Returns `true` when the member is assigned to the project.
    #[must_use]
    pub fn is_assigned_to(&self, project_id: ProjectId) -> bool {
        self.assigned_projects.contains(&project_id)
    }

    /// Returns the cached project count (persisted as `projects`).
    #[must_use]
    pub const fn project_count(&self) -> usize {
        self.project_count
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
    pub fn apply(&mut self, changes: MemberChanges, clock: &impl Clock) {
        self.merge(changes);
        self.updated_at = clock.utc();
    }

    /// Appends a project unless already present and recomputes the project
    /// count. Returns `true` when the project list or the count changed.
    pub(crate) fn join_project(&mut self, project_id: ProjectId, clock: &impl Clock) -> bool {
        if !self.is_assigned_to(project_id) {
            self.assigned_projects.push(project_id);
        }
        self.sync_project_count(clock)
    }

    /// Removes every occurrence of a project and recomputes the project
    /// count. Returns `true` when the project list or the count changed.
    pub(crate) fn leave_project(&mut self, project_id: ProjectId, clock: &impl Clock) -> bool {
        let before = self.assigned_projects.len();
        self.assigned_projects.retain(|id| *id != project_id);
        let removed = self.assigned_projects.len() != before;
        let recounted = self.sync_project_count(clock);
        if removed && !recounted {
            self.updated_at = clock.utc();
        }
        removed || recounted
    }

    /// Drops duplicate project ids and those rejected by `keep`, then
    /// recomputes the project count. Returns `true` when anything changed.
    pub(crate) fn retain_projects(
        &mut self,
        mut keep: impl FnMut(ProjectId) -> bool,
        clock: &impl Clock,
    ) -> bool {
        let before = self.assigned_projects.clone();
        let mut seen = Vec::with_capacity(before.len());
        self.assigned_projects.retain(|id| {
            if seen.contains(id) || !keep(*id) {
                return false;
            }
            seen.push(*id);
            true
        });
        let pruned = self.assigned_projects != before;
        let recounted = self.sync_project_count(clock);
        if pruned && !recounted {
            self.updated_at = clock.utc();
        }
        pruned || recounted
    }

    fn sync_project_count(&mut self, clock: &impl Clock) -> bool {
        let count = self.assigned_projects.len();
        if self.project_count == count {
            return false;
        }
        self.project_count = count;
        self.updated_at = clock.utc();
        true
    }

    /// Overwrites the cached task count. Returns `true` when it changed.
    pub(crate) fn set_task_count(&mut self, count: usize, clock: &impl Clock) -> bool {
        if self.task_count == count {
            return false;
        }
        self.task_count = count;
        self.updated_at = clock.utc();
        true
    }

    fn merge(&mut self, changes: MemberChanges) {
        let MemberChanges {
            name,
            role,
            email,
            status,
            project_role,
        } = changes;

        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = role {
            self.role = value;
        }
        if let Some(value) = email {
            self.email = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = project_role {
            self.project_role = value;
        }
    }
}
