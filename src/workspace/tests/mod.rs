//! Unit tests for the workspace collections, reconciliation and services.

mod integrity_tests;
mod reconcile_tests;

use crate::project::domain::{Project, ProjectChanges, ProjectName};
use crate::storage::adapters::InMemoryKeyValueStore;
use crate::task::domain::{Task, TaskChanges, TaskTitle};
use crate::team::domain::{MemberChanges, MemberName, MemberRole, TeamMember};
use crate::workspace::{Workspace, WorkspacePolicy};
use mockable::DefaultClock;
use std::sync::Arc;

type TestWorkspace = Workspace<InMemoryKeyValueStore, DefaultClock>;

async fn open_workspace(store: InMemoryKeyValueStore, policy: WorkspacePolicy) -> TestWorkspace {
    Workspace::open(Arc::new(store), Arc::new(DefaultClock), policy)
        .await
        .expect("workspace should open")
}

fn project(name: &str) -> Project {
    Project::new(
        ProjectName::new(name).expect("valid project name"),
        ProjectChanges::default(),
        &DefaultClock,
    )
}

fn member(name: &str) -> TeamMember {
    TeamMember::new(
        MemberName::new(name).expect("valid member name"),
        MemberRole::new("Engineer").expect("valid role"),
        MemberChanges::default(),
        &DefaultClock,
    )
}

fn task(title: &str, changes: TaskChanges) -> Task {
    Task::new(
        TaskTitle::new(title).expect("valid task title"),
        changes,
        &DefaultClock,
    )
}
