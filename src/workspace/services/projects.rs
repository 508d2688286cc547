//! Project operations.

use super::Workspace;
use super::requests::{CreateProjectRequest, UpdateProjectRequest};
use crate::project::domain::{Project, ProjectId};
use crate::storage::ports::KeyValueStore;
use crate::workspace::error::{WorkspaceError, WorkspaceResult};
use crate::workspace::reconcile::{self, MissingReference, ReconcileReport};
use mockable::Clock;
use tracing::{debug, warn};

impl<S, C> Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Creates a project with no tasks.
    ///
    /// Members named with [`CreateProjectRequest::with_members`] are
    /// assigned in the same commit, with the project mirrored onto each of
    /// them. Under strict assignments the creation is refused when any of
    /// those members is missing; otherwise missing members stay listed on
    /// the project and are reported in the log.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Project`] when the input is invalid,
    /// [`WorkspaceError::MissingReferences`] when a strict creation names
    /// missing members and [`WorkspaceError::Persistence`] when the commit
    /// fails.
    pub async fn create_project(&self, request: CreateProjectRequest) -> WorkspaceResult<Project> {
        let (name, changes, members) = request.validate()?;
        let mut project = Project::new(name, changes, &*self.clock);

        let mut state = self.lock().await;
        if self.policy.strict_assignments {
            let missing: Vec<MissingReference> = members
                .iter()
                .filter(|member_id| !state.members().contains(**member_id))
                .map(|member_id| MissingReference::Member(*member_id))
                .collect();
            if !missing.is_empty() {
                warn!(?missing, "project creation refused");
                return Err(WorkspaceError::MissingReferences(missing));
            }
        }

        let project_id = project.id();
        for member_id in &members {
            project.add_member(*member_id, &*self.clock);
        }
        state.projects.add(project.clone());
        let mut report = ReconcileReport::default();
        for member_id in members {
            report.merge(reconcile::assign(
                &mut state,
                member_id,
                project_id,
                &*self.clock,
            ));
        }
        if report.is_complete() {
            debug!(%project_id, team = project.team_size(), "project created");
        } else {
            warn!(%project_id, missing = ?report.missing, "project created with missing members");
        }
        self.commit(&mut state).await?;
        Ok(project)
    }

    /// Applies a partial update. Returns `Ok(None)` when the project is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Project`] when the input
    /// is invalid and [`crate::workspace::WorkspaceError::Persistence`] when
    /// the commit fails.
    pub async fn update_project(
        &self,
        project_id: ProjectId,
        request: UpdateProjectRequest,
    ) -> WorkspaceResult<Option<Project>> {
        let changes = request.validate()?;

        let mut state = self.lock().await;
        let updated = state.projects.update(project_id, |project| {
            project.apply(changes, &*self.clock);
            project.clone()
        });
        if updated.is_none() {
            debug!(%project_id, "update skipped: project not found");
            return Ok(None);
        }
        self.commit(&mut state).await?;
        Ok(updated)
    }

    /// Deletes a project and returns it. Returns `Ok(None)` when absent.
    ///
    /// With cascading deletes on, the project is also stripped from every
    /// member and its tasks are detached.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn delete_project(&self, project_id: ProjectId) -> WorkspaceResult<Option<Project>> {
        let mut state = self.lock().await;
        let Some(removed) = state.projects.remove(project_id) else {
            debug!(%project_id, "delete skipped: project not found");
            return Ok(None);
        };
        if self.policy.cascade_deletes {
            let report = reconcile::detach_project(&mut state, project_id, &*self.clock);
            debug!(%project_id, cascaded = report.changed, "project deleted");
        } else {
            debug!(%project_id, "project deleted without cascade");
        }
        self.commit(&mut state).await?;
        Ok(Some(removed))
    }

    /// Returns every project in insertion order.
    pub async fn projects(&self) -> Vec<Project> {
        self.lock().await.projects().list().to_vec()
    }

    /// Returns the project with `project_id`, if present.
    pub async fn project(&self, project_id: ProjectId) -> Option<Project> {
        self.lock().await.projects().get(project_id).cloned()
    }
}
