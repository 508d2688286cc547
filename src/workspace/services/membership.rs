//! Project membership operations.

use super::Workspace;
use crate::project::domain::ProjectId;
use crate::storage::ports::KeyValueStore;
use crate::team::domain::MemberId;
use crate::workspace::error::WorkspaceResult;
use crate::workspace::reconcile::{self, MissingReference, ReconcileReport};
use crate::workspace::unit_of_work::WorkspaceState;
use mockable::Clock;
use tracing::{debug, info, warn};

impl<S, C> Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Assigns a member to a project, updating both sides and both cached
    /// counts. Assigning twice keeps a single entry on each side.
    ///
    /// Under strict assignments nothing changes when either record is
    /// missing; otherwise the side that exists is still updated. Misses are
    /// reported in the returned [`ReconcileReport`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn assign_member(
        &self,
        member_id: MemberId,
        project_id: ProjectId,
    ) -> WorkspaceResult<ReconcileReport> {
        let mut state = self.lock().await;
        if let Some(report) = self.refuse_partial(&state, member_id, project_id) {
            return Ok(report);
        }
        let report = reconcile::assign(&mut state, member_id, project_id, &*self.clock);
        log_membership("assigned", member_id, project_id, &report);
        self.commit(&mut state).await?;
        Ok(report)
    }

    /// Removes a member from a project on both sides and recomputes both
    /// cached counts.
    ///
    /// Removal runs even when one side is missing, so a dangling id left by
    /// a delete without cascade can still be cleared. Misses are reported
    /// in the returned [`ReconcileReport`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn remove_member(
        &self,
        member_id: MemberId,
        project_id: ProjectId,
    ) -> WorkspaceResult<ReconcileReport> {
        let mut state = self.lock().await;
        let report = reconcile::unassign(&mut state, member_id, project_id, &*self.clock);
        log_membership("removed", member_id, project_id, &report);
        self.commit(&mut state).await?;
        Ok(report)
    }

    /// Repairs every cross-reference in the stored state: mirrors one-sided
    /// memberships, drops dangling and duplicate ids, clears task keys that
    /// name missing records and recomputes all cached counts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// commit fails.
    pub async fn repair_references(&self) -> WorkspaceResult<ReconcileReport> {
        let mut state = self.lock().await;
        let report = reconcile::repair(&mut state, &*self.clock);
        info!(changed = report.changed, "references repaired");
        self.commit(&mut state).await?;
        Ok(report)
    }

    fn refuse_partial(
        &self,
        state: &WorkspaceState,
        member_id: MemberId,
        project_id: ProjectId,
    ) -> Option<ReconcileReport> {
        if !self.policy.strict_assignments {
            return None;
        }
        let mut missing = Vec::new();
        if !state.projects().contains(project_id) {
            missing.push(MissingReference::Project(project_id));
        }
        if !state.members().contains(member_id) {
            missing.push(MissingReference::Member(member_id));
        }
        if missing.is_empty() {
            return None;
        }
        warn!(%member_id, %project_id, ?missing, "membership change refused");
        Some(ReconcileReport {
            missing,
            changed: false,
        })
    }
}

fn log_membership(
    action: &str,
    member_id: MemberId,
    project_id: ProjectId,
    report: &ReconcileReport,
) {
    if report.is_complete() {
        debug!(%member_id, %project_id, changed = report.changed, "member {action}");
    } else {
        warn!(
            %member_id,
            %project_id,
            missing = ?report.missing,
            "member {action} with missing references"
        );
    }
}
