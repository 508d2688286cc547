//! Request payloads accepted by workspace operations.
//!
//! Requests carry raw caller input; validation happens when the workspace
//! converts them into domain change sets. Cached counts are absent: they
//! change only through reconciliation. Creation requests may name initial
//! memberships, which the workspace mirrors onto the other side in the same
//! commit.

use crate::common::{Priority, Progress};
use crate::project::domain::{
    ProjectChanges, ProjectDomainError, ProjectId, ProjectName, ProjectStatus,
};
use crate::task::domain::{TaskChanges, TaskDomainError, TaskStatus, TaskTitle};
use crate::team::domain::{
    MemberChanges, MemberId, MemberName, MemberRole, MemberStatus, TeamDomainError,
};
use chrono::NaiveDate;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    fields: UpdateProjectRequest,
    members: Vec<MemberId>,
}

impl CreateProjectRequest {
    /// Creates a request with the required project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: UpdateProjectRequest::new(),
            members: Vec::new(),
        }
    }

    /// Assigns existing team members to the new project.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberId>) -> Self {
        self.members.extend(members);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields = self.fields.with_description(description);
        self
    }

    /// Sets the initial progress percentage.
    #[must_use]
    pub fn with_progress(mut self, progress: u16) -> Self {
        self.fields = self.fields.with_progress(progress);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.fields = self.fields.with_status(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.fields = self.fields.with_priority(priority);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.fields = self.fields.with_start_date(Some(date));
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.fields = self.fields.with_due_date(Some(date));
        self
    }

    pub(super) fn validate(
        self,
    ) -> Result<(ProjectName, ProjectChanges, Vec<MemberId>), ProjectDomainError> {
        let name = ProjectName::new(self.name)?;
        let changes = self.fields.validate()?;
        Ok((name, changes, self.members))
    }
}

/// Request payload for a partial project update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
    progress: Option<u16>,
    status: Option<ProjectStatus>,
    priority: Option<Priority>,
    start_date: Option<Option<NaiveDate>>,
    due_date: Option<Option<NaiveDate>>,
}

impl UpdateProjectRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the project.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the progress percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: u16) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the start date.
    #[must_use]
    pub const fn with_start_date(mut self, date: Option<NaiveDate>) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: Option<NaiveDate>) -> Self {
        self.due_date = Some(date);
        self
    }

    pub(super) fn validate(self) -> Result<ProjectChanges, ProjectDomainError> {
        Ok(ProjectChanges {
            name: self.name.map(ProjectName::new).transpose()?,
            description: self.description,
            progress: self.progress.map(Progress::new).transpose()?,
            status: self.status,
            priority: self.priority,
            start_date: self.start_date,
            due_date: self.due_date,
        })
    }
}

/// Request payload for adding a team member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMemberRequest {
    name: String,
    role: String,
    fields: UpdateMemberRequest,
    project: Option<ProjectId>,
}

impl CreateMemberRequest {
    /// Creates a request with the required name and job role.
    #[must_use]
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            fields: UpdateMemberRequest::new(),
            project: None,
        }
    }

    /// Adds the new member straight to an existing project.
    #[must_use]
    pub const fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project = Some(project_id);
        self
    }

    /// Sets the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.fields = self.fields.with_email(email);
        self
    }

    /// Sets the availability.
    #[must_use]
    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.fields = self.fields.with_status(status);
        self
    }

    /// Sets the per-project role override.
    #[must_use]
    pub fn with_project_role(mut self, role: impl Into<String>) -> Self {
        self.fields = self.fields.with_project_role(Some(role.into()));
        self
    }

    pub(super) fn validate(
        self,
    ) -> Result<(MemberName, MemberRole, MemberChanges, Option<ProjectId>), TeamDomainError> {
        let name = MemberName::new(self.name)?;
        let role = MemberRole::new(self.role)?;
        let changes = self.fields.validate()?;
        Ok((name, role, changes, self.project))
    }
}

/// Request payload for a partial team member update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateMemberRequest {
    name: Option<String>,
    role: Option<String>,
    email: Option<String>,
    status: Option<MemberStatus>,
    project_role: Option<Option<String>>,
}

impl UpdateMemberRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the member.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the job role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Changes the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Changes the availability.
    #[must_use]
    pub const fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets or clears the per-project role override.
    #[must_use]
    pub fn with_project_role(mut self, role: Option<String>) -> Self {
        self.project_role = Some(role);
        self
    }

    pub(super) fn validate(self) -> Result<MemberChanges, TeamDomainError> {
        Ok(MemberChanges {
            name: self.name.map(MemberName::new).transpose()?,
            role: self.role.map(MemberRole::new).transpose()?,
            email: self.email,
            status: self.status,
            project_role: self.project_role,
        })
    }
}

/// Request payload for creating a task.
///
/// Project and assignee identifiers are stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    fields: UpdateTaskRequest,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: UpdateTaskRequest::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields = self.fields.with_description(description);
        self
    }

    /// Places the task in a project.
    #[must_use]
    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.fields = self.fields.with_project(Some(project_id));
        self
    }

    /// Assigns the task.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.fields = self.fields.with_assignee(Some(assignee_id));
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.fields = self.fields.with_status(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.fields = self.fields.with_priority(priority);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.fields = self.fields.with_due_date(Some(date));
        self
    }

    /// Sets the initial progress percentage.
    #[must_use]
    pub fn with_progress(mut self, progress: u16) -> Self {
        self.fields = self.fields.with_progress(Some(progress));
        self
    }

    pub(super) fn validate(self) -> Result<(TaskTitle, TaskChanges), TaskDomainError> {
        let title = TaskTitle::new(self.title)?;
        let changes = self.fields.validate()?;
        Ok((title, changes))
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    project_id: Option<Option<ProjectId>>,
    assignee_id: Option<Option<MemberId>>,
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    due_date: Option<Option<NaiveDate>>,
    progress: Option<Option<u16>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Moves the task to another project, or detaches it with `None`.
    #[must_use]
    pub const fn with_project(mut self, project_id: Option<ProjectId>) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Reassigns the task, or unassigns it with `None`.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: Option<MemberId>) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the status directly, bypassing board rules.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, date: Option<NaiveDate>) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Sets or clears the progress percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: Option<u16>) -> Self {
        self.progress = Some(progress);
        self
    }

    pub(super) fn validate(self) -> Result<TaskChanges, TaskDomainError> {
        let progress = match self.progress {
            Some(Some(value)) => Some(Some(Progress::new(value)?)),
            Some(None) => Some(None),
            None => None,
        };
        Ok(TaskChanges {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description,
            project_id: self.project_id,
            assignee_id: self.assignee_id,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            progress,
        })
    }
}
