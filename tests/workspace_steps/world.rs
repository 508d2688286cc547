//! Shared world state for workspace BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskflow::project::domain::ProjectId;
use taskflow::storage::adapters::InMemoryKeyValueStore;
use taskflow::task::domain::TaskId;
use taskflow::team::domain::MemberId;
use taskflow::workspace::{MoveOutcome, ReconcileReport, Workspace, WorkspacePolicy};

/// Workspace type used by the BDD world.
pub type TestWorkspace = Workspace<InMemoryKeyValueStore, DefaultClock>;

/// Scenario world for workspace behaviour tests.
///
/// Records are created through the service and looked up by the name or
/// title the scenario gave them.
#[derive(Default)]
pub struct WorkspaceWorld {
    pub workspace: Option<TestWorkspace>,
    pub projects: HashMap<String, ProjectId>,
    pub members: HashMap<String, MemberId>,
    pub tasks: HashMap<String, TaskId>,
    pub last_report: Option<ReconcileReport>,
    pub last_move: Option<MoveOutcome>,
}

impl WorkspaceWorld {
    /// Opens an empty in-memory workspace with `policy`.
    pub fn open(&mut self, policy: WorkspacePolicy) -> Result<(), eyre::Report> {
        let workspace = run_async(Workspace::open(
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(DefaultClock),
            policy,
        ))?;
        self.workspace = Some(workspace);
        Ok(())
    }

    /// Returns the open workspace.
    pub fn workspace(&self) -> Result<&TestWorkspace, eyre::Report> {
        self.workspace
            .as_ref()
            .ok_or_else(|| eyre::eyre!("workspace not opened in scenario world"))
    }

    /// Returns the identifier of the project created as `name`.
    pub fn project_id(&self, name: &str) -> Result<ProjectId, eyre::Report> {
        self.projects
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown project {name:?}"))
    }

    /// Returns the identifier of the member created as `name`.
    pub fn member_id(&self, name: &str) -> Result<MemberId, eyre::Report> {
        self.members
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown team member {name:?}"))
    }

    /// Returns the identifier of the task created as `title`.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown task {title:?}"))
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> WorkspaceWorld {
    WorkspaceWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
