//! Reference reconciliation across the three collections.
//!
//! Each function performs one reconciliation step against a
//! [`WorkspaceState`]. A side whose record is missing is skipped and
//! reported in the returned [`ReconcileReport`]; reconciliation never fails.

use super::unit_of_work::WorkspaceState;
use crate::project::domain::ProjectId;
use crate::team::domain::MemberId;
use mockable::Clock;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A reference to a record that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum MissingReference {
    /// No project with this identifier.
    Project(ProjectId),
    /// No team member with this identifier.
    Member(MemberId),
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project {id}"),
            Self::Member(id) => write!(f, "team member {id}"),
        }
    }
}

/// Outcome of a reconciliation step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// References that named absent records and were skipped.
    pub missing: Vec<MissingReference>,
    /// `true` when any record changed.
    pub changed: bool,
}

impl ReconcileReport {
    /// Returns `true` when every referenced record was found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    fn record(&mut self, outcome: Option<bool>, missing: MissingReference) {
        let Some(changed) = outcome else {
            self.push_missing(missing);
            return;
        };
        self.changed |= changed;
    }

    fn push_missing(&mut self, missing: MissingReference) {
        if !self.missing.contains(&missing) {
            self.missing.push(missing);
        }
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.changed |= other.changed;
        for missing in other.missing {
            self.push_missing(missing);
        }
    }
}

/// Adds the member to the project and the project to the member, then
/// recomputes both cached counts.
pub fn assign(
    state: &mut WorkspaceState,
    member_id: MemberId,
    project_id: ProjectId,
    clock: &impl Clock,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let project = state
        .projects
        .modify(project_id, |project| project.add_member(member_id, clock));
    report.record(project, MissingReference::Project(project_id));
    let member = state
        .members
        .modify(member_id, |member| member.join_project(project_id, clock));
    report.record(member, MissingReference::Member(member_id));
    report
}

/// Removes the member from the project and the project from the member,
/// then recomputes both cached counts.
pub fn unassign(
    state: &mut WorkspaceState,
    member_id: MemberId,
    project_id: ProjectId,
    clock: &impl Clock,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let project = state
        .projects
        .modify(project_id, |project| project.remove_member(member_id, clock));
    report.record(project, MissingReference::Project(project_id));
    let member = state
        .members
        .modify(member_id, |member| member.leave_project(project_id, clock));
    report.record(member, MissingReference::Member(member_id));
    report
}

/// Strips a project from every member and detaches its tasks.
pub fn detach_project(
    state: &mut WorkspaceState,
    project_id: ProjectId,
    clock: &impl Clock,
) -> ReconcileReport {
    let members = state
        .members
        .update_each(|member| member.leave_project(project_id, clock));
    let tasks = state.tasks.update_each(|task| {
        task.project_id() == Some(project_id) && task.detach_project(clock)
    });
    ReconcileReport {
        missing: Vec::new(),
        changed: members + tasks > 0,
    }
}

/// Strips a member from every project and unassigns its tasks.
pub fn detach_member(
    state: &mut WorkspaceState,
    member_id: MemberId,
    clock: &impl Clock,
) -> ReconcileReport {
    let projects = state
        .projects
        .update_each(|project| project.remove_member(member_id, clock));
    let tasks = state
        .tasks
        .update_each(|task| task.assignee_id() == Some(member_id) && task.unassign(clock));
    ReconcileReport {
        missing: Vec::new(),
        changed: projects + tasks > 0,
    }
}

/// Recounts the tasks of each listed project and member.
///
/// `None` entries are ignored so callers can pass a task's optional keys
/// directly.
pub fn refresh_task_counts(
    state: &mut WorkspaceState,
    projects: impl IntoIterator<Item = Option<ProjectId>>,
    members: impl IntoIterator<Item = Option<MemberId>>,
    clock: &impl Clock,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let projects: BTreeSet<ProjectId> = projects.into_iter().flatten().collect();
    let members: BTreeSet<MemberId> = members.into_iter().flatten().collect();

    for project_id in projects {
        let count = state
            .tasks
            .list()
            .iter()
            .filter(|task| task.project_id() == Some(project_id))
            .count();
        let outcome = state
            .projects
            .modify(project_id, |project| project.set_task_count(count, clock));
        report.record(outcome, MissingReference::Project(project_id));
    }

    for member_id in members {
        let count = state
            .tasks
            .list()
            .iter()
            .filter(|task| task.assignee_id() == Some(member_id))
            .count();
        let outcome = state
            .members
            .modify(member_id, |member| member.set_task_count(count, clock));
        report.record(outcome, MissingReference::Member(member_id));
    }
    report
}

/// Restores every reference invariant over the whole state.
///
/// Drops duplicate and dangling membership ids, adds the missing mirror of
/// each one-sided membership, clears task keys that name absent records and
/// recomputes every cached count. Nothing is reported missing: dangling
/// references are repaired rather than skipped.
pub fn repair(state: &mut WorkspaceState, clock: &impl Clock) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    let member_ids: BTreeSet<MemberId> = state.members.list().iter().map(|m| m.id()).collect();
    let project_ids: BTreeSet<ProjectId> =
        state.projects.list().iter().map(|p| p.id()).collect();

    let pruned = state.projects.update_each(|project| {
        project.retain_members(|id| member_ids.contains(&id), clock)
    }) + state.members.update_each(|member| {
        member.retain_projects(|id| project_ids.contains(&id), clock)
    });
    report.changed |= pruned > 0;

    let pairs: BTreeSet<(MemberId, ProjectId)> = state
        .projects
        .list()
        .iter()
        .flat_map(|project| {
            let project_id = project.id();
            project
                .assigned_members()
                .iter()
                .map(move |member_id| (*member_id, project_id))
        })
        .chain(state.members.list().iter().flat_map(|member| {
            let member_id = member.id();
            member
                .assigned_projects()
                .iter()
                .map(move |project_id| (member_id, *project_id))
        }))
        .collect();
    for (member_id, project_id) in pairs {
        report.merge(assign(state, member_id, project_id, clock));
    }

    let cleared = state.tasks.update_each(|task| {
        let dangling_project = task
            .project_id()
            .is_some_and(|id| !project_ids.contains(&id));
        let dangling_assignee = task
            .assignee_id()
            .is_some_and(|id| !member_ids.contains(&id));
        let detached = dangling_project && task.detach_project(clock);
        let unassigned = dangling_assignee && task.unassign(clock);
        detached || unassigned
    });
    report.changed |= cleared > 0;

    report.merge(refresh_task_counts(
        state,
        project_ids.iter().copied().map(Some),
        member_ids.iter().copied().map(Some),
        clock,
    ));
    report
}
