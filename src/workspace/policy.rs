//! Reference and transition policies applied by the workspace.

use crate::task::domain::TransitionPolicy;

/// Switches controlling how the workspace keeps cross-references intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspacePolicy {
    /// Strip a deleted project or member from every record that refers to
    /// it. When off, deletes leave orphaned identifiers behind.
    pub cascade_deletes: bool,
    /// Refuse an assignment when either side is missing. When off, the side
    /// that exists is still updated. Removals always update the side that
    /// exists.
    pub strict_assignments: bool,
    /// Status transition rules.
    pub transition: TransitionPolicy,
}

impl Default for WorkspacePolicy {
    fn default() -> Self {
        Self {
            cascade_deletes: true,
            strict_assignments: true,
            transition: TransitionPolicy::default(),
        }
    }
}

impl WorkspacePolicy {
    /// Returns the policy with cascading deletes switched on or off.
    #[must_use]
    pub const fn with_cascade_deletes(mut self, enabled: bool) -> Self {
        self.cascade_deletes = enabled;
        self
    }

    /// Returns the policy with strict assignments switched on or off.
    #[must_use]
    pub const fn with_strict_assignments(mut self, enabled: bool) -> Self {
        self.strict_assignments = enabled;
        self
    }

    /// Returns the policy with the given transition rules.
    #[must_use]
    pub const fn with_transition(mut self, transition: TransitionPolicy) -> Self {
        self.transition = transition;
        self
    }
}
