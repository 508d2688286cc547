//! Team member operations.

use super::Workspace;
use super::requests::{CreateMemberRequest, UpdateMemberRequest};
use crate::project::domain::ProjectId;
use crate::storage::ports::KeyValueStore;
use crate::team::domain::{MemberId, TeamMember};
use crate::workspace::error::{WorkspaceError, WorkspaceResult};
use crate::workspace::reconcile::{self, MissingReference};
use mockable::Clock;
use tracing::{debug, warn};

impl<S, C> Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Adds a team member.
    ///
    /// A project named with [`CreateMemberRequest::with_project`] is
    /// assigned in the same commit, with the member mirrored onto the
    /// project. Under strict assignments the creation is refused when that
    /// project is missing.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Member`] when the input is invalid,
    /// [`WorkspaceError::MissingReferences`] when a strict creation names a
    /// missing project and [`WorkspaceError::Persistence`] when the commit
    /// fails.
    pub async fn create_member(&self, request: CreateMemberRequest) -> WorkspaceResult<TeamMember> {
        let (name, role, changes, project) = request.validate()?;
        let mut member = TeamMember::new(name, role, changes, &*self.clock);

        let mut state = self.lock().await;
        let Some(project_id) = project else {
            state.members.add(member.clone());
            debug!(member_id = %member.id(), "team member created");
            self.commit(&mut state).await?;
            return Ok(member);
        };
        if self.policy.strict_assignments && !state.projects().contains(project_id) {
            warn!(%project_id, "team member creation refused");
            return Err(WorkspaceError::MissingReferences(vec![
                MissingReference::Project(project_id),
            ]));
        }

        let member_id = member.id();
        member.join_project(project_id, &*self.clock);
        state.members.add(member.clone());
        let report = reconcile::assign(&mut state, member_id, project_id, &*self.clock);
        if report.is_complete() {
            debug!(%member_id, %project_id, "team member created on project");
        } else {
            warn!(
                %member_id,
                missing = ?report.missing,
                "team member created with missing project"
            );
        }
        self.commit(&mut state).await?;
        Ok(member)
    }

    /// Applies a partial update. Returns `Ok(None)` when the member is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Member`] when the input is
    /// invalid and [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn update_member(
        &self,
        member_id: MemberId,
        request: UpdateMemberRequest,
    ) -> WorkspaceResult<Option<TeamMember>> {
        let changes = request.validate()?;

        let mut state = self.lock().await;
        let updated = state.members.update(member_id, |member| {
            member.apply(changes, &*self.clock);
            member.clone()
        });
        if updated.is_none() {
            debug!(%member_id, "update skipped: team member not found");
            return Ok(None);
        }
        self.commit(&mut state).await?;
        Ok(updated)
    }

    /// Deletes a team member and returns it. Returns `Ok(None)` when absent.
    ///
    /// With cascading deletes on, the member is also stripped from every
    /// project and its tasks are unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn delete_member(&self, member_id: MemberId) -> WorkspaceResult<Option<TeamMember>> {
        let mut state = self.lock().await;
        let Some(removed) = state.members.remove(member_id) else {
            debug!(%member_id, "delete skipped: team member not found");
            return Ok(None);
        };
        if self.policy.cascade_deletes {
            let report = reconcile::detach_member(&mut state, member_id, &*self.clock);
            debug!(%member_id, cascaded = report.changed, "team member deleted");
        } else {
            debug!(%member_id, "team member deleted without cascade");
        }
        self.commit(&mut state).await?;
        Ok(Some(removed))
    }

    /// Returns every team member in insertion order.
    pub async fn members(&self) -> Vec<TeamMember> {
        self.lock().await.members().list().to_vec()
    }

    /// Returns the team member with `member_id`, if present.
    pub async fn member(&self, member_id: MemberId) -> Option<TeamMember> {
        self.lock().await.members().get(member_id).cloned()
    }

    /// Returns the members whose assignments include `project_id`.
    pub async fn members_by_project(&self, project_id: ProjectId) -> Vec<TeamMember> {
        self.lock()
            .await
            .members()
            .list()
            .iter()
            .filter(|member| member.is_assigned_to(project_id))
            .cloned()
            .collect()
    }
}
