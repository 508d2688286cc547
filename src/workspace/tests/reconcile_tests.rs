//! Tests for reciprocal membership and cached count maintenance.

use super::{member, project, task};
use crate::project::domain::ProjectId;
use crate::task::domain::TaskChanges;
use crate::team::domain::MemberId;
use crate::workspace::reconcile::{self, MissingReference};
use crate::workspace::{ProjectStore, TaskStore, TeamStore, WorkspaceState, integrity};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;

struct Pair {
    state: WorkspaceState,
    project_id: ProjectId,
    member_id: MemberId,
}

#[fixture]
fn pair() -> Pair {
    let website = project("Website Redesign");
    let alex = member("Alex Johnson");
    let project_id = website.id();
    let member_id = alex.id();
    Pair {
        state: WorkspaceState::from_parts(
            ProjectStore::from_records(vec![website]),
            TeamStore::from_records(vec![alex]),
            TaskStore::default(),
        ),
        project_id,
        member_id,
    }
}

fn project_members(state: &WorkspaceState, id: ProjectId) -> (Vec<MemberId>, usize) {
    let project = state.projects().get(id).expect("project exists");
    (project.assigned_members().to_vec(), project.team_size())
}

fn member_projects(state: &WorkspaceState, id: MemberId) -> (Vec<ProjectId>, usize) {
    let member = state.members().get(id).expect("member exists");
    (member.assigned_projects().to_vec(), member.project_count())
}

#[rstest]
fn assign_mirrors_both_sides_and_counts(mut pair: Pair) -> eyre::Result<()> {
    let report = reconcile::assign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);

    ensure!(report.changed && report.is_complete());
    ensure!(project_members(&pair.state, pair.project_id) == (vec![pair.member_id], 1));
    ensure!(member_projects(&pair.state, pair.member_id) == (vec![pair.project_id], 1));
    ensure!(pair.state.projects().is_dirty() && pair.state.members().is_dirty());
    Ok(())
}

#[rstest]
fn assigning_twice_keeps_one_entry(mut pair: Pair) -> eyre::Result<()> {
    reconcile::assign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);
    let second = reconcile::assign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);

    ensure!(!second.changed, "second assignment should be a no-op");
    ensure!(project_members(&pair.state, pair.project_id) == (vec![pair.member_id], 1));
    ensure!(member_projects(&pair.state, pair.member_id) == (vec![pair.project_id], 1));
    Ok(())
}

#[rstest]
fn assign_then_unassign_restores_both_sides(mut pair: Pair) -> eyre::Result<()> {
    let project_before = project_members(&pair.state, pair.project_id);
    let member_before = member_projects(&pair.state, pair.member_id);

    reconcile::assign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);
    let report =
        reconcile::unassign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);

    ensure!(report.changed);
    ensure!(project_members(&pair.state, pair.project_id) == project_before);
    ensure!(member_projects(&pair.state, pair.member_id) == member_before);
    Ok(())
}

#[rstest]
fn unassigning_an_absent_membership_leaves_counts_at_zero(mut pair: Pair) {
    let report =
        reconcile::unassign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);

    assert!(!report.changed);
    assert_eq!(project_members(&pair.state, pair.project_id), (vec![], 0));
    assert_eq!(member_projects(&pair.state, pair.member_id), (vec![], 0));
}

#[rstest]
fn missing_member_is_reported_and_project_side_still_updated(mut pair: Pair) {
    let ghost = MemberId::new();

    let report = reconcile::assign(&mut pair.state, ghost, pair.project_id, &DefaultClock);

    assert_eq!(report.missing, vec![MissingReference::Member(ghost)]);
    assert_eq!(project_members(&pair.state, pair.project_id), (vec![ghost], 1));
}

#[rstest]
fn detaching_a_project_strips_members_and_tasks(mut pair: Pair) {
    reconcile::assign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);
    let owned = task(
        "Wireframes",
        TaskChanges {
            project_id: Some(Some(pair.project_id)),
            assignee_id: Some(Some(pair.member_id)),
            ..TaskChanges::default()
        },
    );
    let unrelated = task("Budget", TaskChanges::default());
    let owned_id = owned.id();
    pair.state.tasks = TaskStore::from_records(vec![owned, unrelated]);
    pair.state.projects.remove(pair.project_id);

    let report = reconcile::detach_project(&mut pair.state, pair.project_id, &DefaultClock);

    assert!(report.changed);
    assert_eq!(member_projects(&pair.state, pair.member_id), (vec![], 0));
    let detached = pair.state.tasks().get(owned_id).expect("task kept");
    assert_eq!(detached.project_id(), None);
    assert_eq!(detached.assignee_id(), Some(pair.member_id));
}

#[rstest]
fn detaching_a_member_strips_projects_and_unassigns_tasks(mut pair: Pair) {
    reconcile::assign(&mut pair.state, pair.member_id, pair.project_id, &DefaultClock);
    let owned = task(
        "Wireframes",
        TaskChanges {
            project_id: Some(Some(pair.project_id)),
            assignee_id: Some(Some(pair.member_id)),
            ..TaskChanges::default()
        },
    );
    let owned_id = owned.id();
    pair.state.tasks = TaskStore::from_records(vec![owned]);
    pair.state.members.remove(pair.member_id);

    let report = reconcile::detach_member(&mut pair.state, pair.member_id, &DefaultClock);

    assert!(report.changed);
    assert_eq!(project_members(&pair.state, pair.project_id), (vec![], 0));
    let unassigned = pair.state.tasks().get(owned_id).expect("task kept");
    assert_eq!(unassigned.assignee_id(), None);
    assert_eq!(unassigned.project_id(), Some(pair.project_id));
}

#[rstest]
fn task_counts_follow_the_task_collection(mut pair: Pair) {
    let missing_project = ProjectId::new();
    pair.state.tasks = TaskStore::from_records(vec![
        task(
            "One",
            TaskChanges {
                project_id: Some(Some(pair.project_id)),
                assignee_id: Some(Some(pair.member_id)),
                ..TaskChanges::default()
            },
        ),
        task(
            "Two",
            TaskChanges {
                project_id: Some(Some(pair.project_id)),
                ..TaskChanges::default()
            },
        ),
    ]);

    let report = reconcile::refresh_task_counts(
        &mut pair.state,
        [Some(pair.project_id), Some(missing_project), None],
        [Some(pair.member_id)],
        &DefaultClock,
    );

    assert_eq!(report.missing, vec![MissingReference::Project(missing_project)]);
    assert_eq!(
        pair.state.projects().get(pair.project_id).map(|p| p.task_count()),
        Some(2)
    );
    assert_eq!(
        pair.state.members().get(pair.member_id).map(|m| m.task_count()),
        Some(1)
    );
}

#[rstest]
fn repair_restores_every_invariant() -> eyre::Result<()> {
    let project_id = ProjectId::new();
    let member_id = MemberId::new();
    let ghost = MemberId::new();
    let stamp = "2024-05-01T09:00:00Z";
    let projects = json!([{
        "id": project_id,
        "name": "Website Redesign",
        "assignedMembers": [ghost, ghost],
        "team": 7,
        "tasks": 0,
        "createdAt": stamp,
        "updatedAt": stamp,
    }]);
    let members = json!([{
        "id": member_id,
        "name": "Alex Johnson",
        "role": "Frontend Developer",
        "assignedProjects": [project_id],
        "projects": 0,
        "tasks": 4,
        "createdAt": stamp,
        "updatedAt": stamp,
    }]);
    let tasks = json!([{
        "id": crate::task::domain::TaskId::new(),
        "title": "Orphan",
        "projectId": ProjectId::new(),
        "assigneeId": member_id,
        "createdAt": stamp,
        "updatedAt": stamp,
    }]);
    let mut state = WorkspaceState::from_parts(
        ProjectStore::decode(&projects.to_string())?,
        TeamStore::decode(&members.to_string())?,
        TaskStore::decode(&tasks.to_string())?,
    );
    ensure!(!integrity::audit(&state).is_empty());

    let report = reconcile::repair(&mut state, &DefaultClock);

    ensure!(report.changed && report.is_complete());
    let violations = integrity::audit(&state);
    ensure!(violations.is_empty(), "unexpected violations: {violations:?}");
    ensure!(project_members(&state, project_id) == (vec![member_id], 1));
    ensure!(member_projects(&state, member_id) == (vec![project_id], 1));
    let orphan = state.tasks().list().first().expect("task kept");
    ensure!(orphan.project_id().is_none());
    ensure!(state.members().get(member_id).map(|m| m.task_count()) == Some(1));
    Ok(())
}
