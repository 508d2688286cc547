//! The workspace service: serialised access to the collections and the
//! commit step shared by every operation.

use crate::storage::ports::KeyValueStore;
use crate::workspace::error::WorkspaceResult;
use crate::workspace::policy::WorkspacePolicy;
use crate::workspace::unit_of_work::WorkspaceState;
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

/// Project, team and task management over a key-value store.
///
/// Operations run one at a time. Each one mutates the in-memory state,
/// including every reciprocal reference update it requires, and then
/// writes all touched collections in a single batch. When that write fails
/// the in-memory state is kept, the error is returned, and the unwritten
/// collections are retried on the next commit.
pub struct Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    pub(super) store: Arc<S>,
    pub(super) clock: Arc<C>,
    pub(super) policy: WorkspacePolicy,
    state: Mutex<WorkspaceState>,
}

impl<S, C> Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Loads the workspace from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// store cannot be read and
    /// [`crate::workspace::WorkspaceError::CorruptCollection`] when a stored
    /// collection does not decode.
    pub async fn open(
        store: Arc<S>,
        clock: Arc<C>,
        policy: WorkspacePolicy,
    ) -> WorkspaceResult<Self> {
        let state = WorkspaceState::load(store.as_ref()).await?;
        info!(
            projects = state.projects().len(),
            members = state.members().len(),
            tasks = state.tasks().len(),
            "workspace loaded"
        );
        Ok(Self {
            store,
            clock,
            policy,
            state: Mutex::new(state),
        })
    }

    /// Returns the active policy.
    #[must_use]
    pub const fn policy(&self) -> WorkspacePolicy {
        self.policy
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> WorkspaceState {
        self.state.lock().await.clone()
    }

    /// Returns `true` when some changes have not reached the store yet.
    pub async fn has_pending_changes(&self) -> bool {
        self.state.lock().await.is_dirty()
    }

    /// Writes any changes left over from a failed commit.
    ///
    /// # Errors
    ///
    /// Returns [`crate::workspace::WorkspaceError::Persistence`] when the
    /// store rejects the batch.
    pub async fn flush(&self) -> WorkspaceResult<()> {
        let mut state = self.lock().await;
        self.commit(&mut state).await
    }

    pub(super) async fn lock(&self) -> MutexGuard<'_, WorkspaceState> {
        self.state.lock().await
    }

    pub(super) async fn commit(&self, state: &mut WorkspaceState) -> WorkspaceResult<()> {
        let keys = state.dirty_keys();
        if keys.is_empty() {
            return Ok(());
        }
        let writes = state.pending_writes()?;
        if let Err(err) = self.store.write_batch(&writes).await {
            error!(error = %err, keys = ?keys, "failed to persist workspace changes");
            return Err(err.into());
        }
        state.mark_committed(&keys);
        debug!(keys = ?keys, "committed workspace changes");
        Ok(())
    }
}
