//! Read-only reports over the whole workspace.

use super::Workspace;
use crate::storage::ports::KeyValueStore;
use crate::workspace::integrity::{self, IntegrityViolation};
use crate::workspace::summary::DashboardSummary;
use mockable::Clock;

impl<S, C> Workspace<S, C>
where
    S: KeyValueStore,
    C: Clock + Send + Sync,
{
    /// Computes the dashboard figures.
    pub async fn summary(&self) -> DashboardSummary {
        DashboardSummary::of(&*self.lock().await)
    }

    /// Lists every broken reference invariant. Empty when the state is
    /// consistent.
    pub async fn integrity_report(&self) -> Vec<IntegrityViolation> {
        integrity::audit(&*self.lock().await)
    }
}
