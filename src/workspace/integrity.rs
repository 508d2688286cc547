//! Audit of the cross-reference invariants over a loaded state.

use super::unit_of_work::WorkspaceState;
use crate::project::domain::ProjectId;
use crate::task::domain::TaskId;
use crate::team::domain::MemberId;
use serde::Serialize;
use std::fmt;

/// One broken reference invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IntegrityViolation {
    /// A project lists a member that does not exist.
    #[serde(rename_all = "camelCase")]
    DanglingMember {
        /// Listing project.
        project_id: ProjectId,
        /// Absent member.
        member_id: MemberId,
    },
    /// A member lists a project that does not exist.
    #[serde(rename_all = "camelCase")]
    DanglingProject {
        /// Listing member.
        member_id: MemberId,
        /// Absent project.
        project_id: ProjectId,
    },
    /// A project lists a member whose assignments omit the project.
    #[serde(rename_all = "camelCase")]
    UnmirroredMember {
        /// Listing project.
        project_id: ProjectId,
        /// Member missing the mirror entry.
        member_id: MemberId,
    },
    /// A member lists a project whose members omit the member.
    #[serde(rename_all = "camelCase")]
    UnmirroredProject {
        /// Listing member.
        member_id: MemberId,
        /// Project missing the mirror entry.
        project_id: ProjectId,
    },
    /// A project lists the same member more than once.
    #[serde(rename_all = "camelCase")]
    DuplicateMember {
        /// Listing project.
        project_id: ProjectId,
        /// Repeated member.
        member_id: MemberId,
    },
    /// A member lists the same project more than once.
    #[serde(rename_all = "camelCase")]
    DuplicateProject {
        /// Listing member.
        member_id: MemberId,
        /// Repeated project.
        project_id: ProjectId,
    },
    /// A project's cached `team` differs from its member list length.
    #[serde(rename_all = "camelCase")]
    TeamSizeMismatch {
        /// Affected project.
        project_id: ProjectId,
        /// Stored count.
        cached: usize,
        /// Actual count.
        actual: usize,
    },
    /// A member's cached `projects` differs from its project list length.
    #[serde(rename_all = "camelCase")]
    ProjectCountMismatch {
        /// Affected member.
        member_id: MemberId,
        /// Stored count.
        cached: usize,
        /// Actual count.
        actual: usize,
    },
    /// A project's cached `tasks` differs from the tasks that name it.
    #[serde(rename_all = "camelCase")]
    ProjectTaskCountMismatch {
        /// Affected project.
        project_id: ProjectId,
        /// Stored count.
        cached: usize,
        /// Actual count.
        actual: usize,
    },
    /// A member's cached `tasks` differs from the tasks assigned to it.
    #[serde(rename_all = "camelCase")]
    MemberTaskCountMismatch {
        /// Affected member.
        member_id: MemberId,
        /// Stored count.
        cached: usize,
        /// Actual count.
        actual: usize,
    },
    /// A task names a project that does not exist.
    #[serde(rename_all = "camelCase")]
    OrphanedTaskProject {
        /// Affected task.
        task_id: TaskId,
        /// Absent project.
        project_id: ProjectId,
    },
    /// A task names an assignee that does not exist.
    #[serde(rename_all = "camelCase")]
    OrphanedTaskAssignee {
        /// Affected task.
        task_id: TaskId,
        /// Absent member.
        member_id: MemberId,
    },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingMember {
                project_id,
                member_id,
            } => write!(f, "project {project_id} lists missing member {member_id}"),
            Self::DanglingProject {
                member_id,
                project_id,
            } => write!(f, "member {member_id} lists missing project {project_id}"),
            Self::UnmirroredMember {
                project_id,
                member_id,
            } => write!(
                f,
                "project {project_id} lists member {member_id} who does not list it back"
            ),
            Self::UnmirroredProject {
                member_id,
                project_id,
            } => write!(
                f,
                "member {member_id} lists project {project_id} which does not list them back"
            ),
            Self::DuplicateMember {
                project_id,
                member_id,
            } => write!(f, "project {project_id} lists member {member_id} twice"),
            Self::DuplicateProject {
                member_id,
                project_id,
            } => write!(f, "member {member_id} lists project {project_id} twice"),
            Self::TeamSizeMismatch {
                project_id,
                cached,
                actual,
            } => write!(f, "project {project_id} team is {cached}, expected {actual}"),
            Self::ProjectCountMismatch {
                member_id,
                cached,
                actual,
            } => write!(f, "member {member_id} projects is {cached}, expected {actual}"),
            Self::ProjectTaskCountMismatch {
                project_id,
                cached,
                actual,
            } => write!(f, "project {project_id} tasks is {cached}, expected {actual}"),
            Self::MemberTaskCountMismatch {
                member_id,
                cached,
                actual,
            } => write!(f, "member {member_id} tasks is {cached}, expected {actual}"),
            Self::OrphanedTaskProject {
                task_id,
                project_id,
            } => write!(f, "task {task_id} names missing project {project_id}"),
            Self::OrphanedTaskAssignee { task_id, member_id } => {
                write!(f, "task {task_id} names missing assignee {member_id}")
            }
        }
    }
}

/// Lists every invariant violation in `state`, projects first, then members,
/// then tasks.
#[must_use]
pub fn audit(state: &WorkspaceState) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();
    audit_projects(state, &mut violations);
    audit_members(state, &mut violations);
    audit_tasks(state, &mut violations);
    violations
}

fn audit_projects(state: &WorkspaceState, violations: &mut Vec<IntegrityViolation>) {
    for project in state.projects().list() {
        let project_id = project.id();
        let mut seen = Vec::new();
        for member_id in project.assigned_members().iter().copied() {
            if seen.contains(&member_id) {
                violations.push(IntegrityViolation::DuplicateMember {
                    project_id,
                    member_id,
                });
                continue;
            }
            seen.push(member_id);
            match state.members().get(member_id) {
                None => violations.push(IntegrityViolation::DanglingMember {
                    project_id,
                    member_id,
                }),
                Some(member) if !member.is_assigned_to(project_id) => {
                    violations.push(IntegrityViolation::UnmirroredMember {
                        project_id,
                        member_id,
                    });
                }
                Some(_) => {}
            }
        }

        let team_size = project.assigned_members().len();
        if project.team_size() != team_size {
            violations.push(IntegrityViolation::TeamSizeMismatch {
                project_id,
                cached: project.team_size(),
                actual: team_size,
            });
        }

        let task_count = state
            .tasks()
            .list()
            .iter()
            .filter(|task| task.project_id() == Some(project_id))
            .count();
        if project.task_count() != task_count {
            violations.push(IntegrityViolation::ProjectTaskCountMismatch {
                project_id,
                cached: project.task_count(),
                actual: task_count,
            });
        }
    }
}

fn audit_members(state: &WorkspaceState, violations: &mut Vec<IntegrityViolation>) {
    for member in state.members().list() {
        let member_id = member.id();
        let mut seen = Vec::new();
        for project_id in member.assigned_projects().iter().copied() {
            if seen.contains(&project_id) {
                violations.push(IntegrityViolation::DuplicateProject {
                    member_id,
                    project_id,
                });
                continue;
            }
            seen.push(project_id);
            match state.projects().get(project_id) {
                None => violations.push(IntegrityViolation::DanglingProject {
                    member_id,
                    project_id,
                }),
                Some(project) if !project.has_member(member_id) => {
                    violations.push(IntegrityViolation::UnmirroredProject {
                        member_id,
                        project_id,
                    });
                }
                Some(_) => {}
            }
        }

        let project_count = member.assigned_projects().len();
        if member.project_count() != project_count {
            violations.push(IntegrityViolation::ProjectCountMismatch {
                member_id,
                cached: member.project_count(),
                actual: project_count,
            });
        }

        let task_count = state
            .tasks()
            .list()
            .iter()
            .filter(|task| task.assignee_id() == Some(member_id))
            .count();
        if member.task_count() != task_count {
            violations.push(IntegrityViolation::MemberTaskCountMismatch {
                member_id,
                cached: member.task_count(),
                actual: task_count,
            });
        }
    }
}

fn audit_tasks(state: &WorkspaceState, violations: &mut Vec<IntegrityViolation>) {
    for task in state.tasks().list() {
        if let Some(project_id) = task.project_id()
            && !state.projects().contains(project_id)
        {
            violations.push(IntegrityViolation::OrphanedTaskProject {
                task_id: task.id(),
                project_id,
            });
        }
        if let Some(member_id) = task.assignee_id()
            && !state.members().contains(member_id)
        {
            violations.push(IntegrityViolation::OrphanedTaskAssignee {
                task_id: task.id(),
                member_id,
            });
        }
    }
}
