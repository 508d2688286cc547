//! Tests for the reference invariant audit.

use crate::project::domain::ProjectId;
use crate::task::domain::TaskId;
use crate::team::domain::MemberId;
use crate::workspace::{
    IntegrityViolation, ProjectStore, TaskStore, TeamStore, WorkspaceState, integrity,
};
use rstest::rstest;
use serde_json::json;

const STAMP: &str = "2024-05-01T09:00:00Z";

fn state_from(
    projects: &serde_json::Value,
    members: &serde_json::Value,
    tasks: &serde_json::Value,
) -> WorkspaceState {
    WorkspaceState::from_parts(
        ProjectStore::decode(&projects.to_string()).expect("projects decode"),
        TeamStore::decode(&members.to_string()).expect("members decode"),
        TaskStore::decode(&tasks.to_string()).expect("tasks decode"),
    )
}

#[rstest]
fn empty_state_is_consistent() {
    assert!(integrity::audit(&WorkspaceState::default()).is_empty());
}

#[rstest]
fn consistent_state_has_no_violations() {
    let project_id = ProjectId::new();
    let member_id = MemberId::new();
    let state = state_from(
        &json!([{
            "id": project_id, "name": "Mobile App", "assignedMembers": [member_id],
            "team": 1, "tasks": 1, "createdAt": STAMP, "updatedAt": STAMP,
        }]),
        &json!([{
            "id": member_id, "name": "Sam", "role": "Designer",
            "assignedProjects": [project_id], "projects": 1, "tasks": 1,
            "createdAt": STAMP, "updatedAt": STAMP,
        }]),
        &json!([{
            "id": TaskId::new(), "title": "Icons", "projectId": project_id,
            "assigneeId": member_id, "createdAt": STAMP, "updatedAt": STAMP,
        }]),
    );

    assert!(integrity::audit(&state).is_empty());
}

#[rstest]
fn every_kind_of_breakage_is_reported() {
    let project_id = ProjectId::new();
    let member_id = MemberId::new();
    let ghost_member = MemberId::new();
    let ghost_project = ProjectId::new();
    let task_id = TaskId::new();
    let state = state_from(
        &json!([{
            "id": project_id, "name": "Mobile App",
            "assignedMembers": [member_id, member_id, ghost_member],
            "team": 1, "tasks": 0, "createdAt": STAMP, "updatedAt": STAMP,
        }]),
        &json!([{
            "id": member_id, "name": "Sam", "role": "Designer",
            "assignedProjects": [ghost_project], "projects": 0, "tasks": 2,
            "createdAt": STAMP, "updatedAt": STAMP,
        }]),
        &json!([{
            "id": task_id, "title": "Icons", "projectId": ghost_project,
            "assigneeId": ghost_member, "createdAt": STAMP, "updatedAt": STAMP,
        }]),
    );

    let violations = integrity::audit(&state);

    assert_eq!(
        violations,
        vec![
            IntegrityViolation::UnmirroredMember {
                project_id,
                member_id,
            },
            IntegrityViolation::DuplicateMember {
                project_id,
                member_id,
            },
            IntegrityViolation::DanglingMember {
                project_id,
                member_id: ghost_member,
            },
            IntegrityViolation::TeamSizeMismatch {
                project_id,
                cached: 1,
                actual: 3,
            },
            IntegrityViolation::DanglingProject {
                member_id,
                project_id: ghost_project,
            },
            IntegrityViolation::ProjectCountMismatch {
                member_id,
                cached: 0,
                actual: 1,
            },
            IntegrityViolation::MemberTaskCountMismatch {
                member_id,
                cached: 2,
                actual: 0,
            },
            IntegrityViolation::OrphanedTaskProject {
                task_id,
                project_id: ghost_project,
            },
            IntegrityViolation::OrphanedTaskAssignee {
                task_id,
                member_id: ghost_member,
            },
        ]
    );
}

#[rstest]
fn violations_serialize_with_a_kind_tag() {
    let violation = IntegrityViolation::TeamSizeMismatch {
        project_id: ProjectId::new(),
        cached: 2,
        actual: 1,
    };

    let value = serde_json::to_value(violation).expect("violation serializes");

    assert_eq!(value["kind"], "teamSizeMismatch");
    assert_eq!(value["cached"], 2);
    assert!(value.get("projectId").is_some());
}
