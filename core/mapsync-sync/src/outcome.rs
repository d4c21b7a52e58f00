use serde::Serialize;
use std::fmt;

/// What one reconciliation of one entity did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// The entity was materialized in the engine.
    Created,
    /// The live entity was updated with `ops` engine calls.
    Updated { ops: usize },
    /// The live entity already matched the declaration.
    Unchanged,
    /// Not materialized yet: the style is not ready or a dependency is
    /// missing. Retried on the next readiness-triggered pass.
    Deferred,
    /// The entity was removed from the engine.
    Removed,
    /// Nothing to do (e.g. a popup the user closed, a teardown of an entity
    /// that is not live).
    Skipped,
    /// A diagnostic was reported instead.
    Failed,
}

impl ReconcileOutcome {
    /// Returns true if engine state changed.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ReconcileOutcome::Created | ReconcileOutcome::Updated { .. } | ReconcileOutcome::Removed
        )
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::Created => f.write_str("created"),
            ReconcileOutcome::Updated { ops } => write!(f, "updated ({ops} ops)"),
            ReconcileOutcome::Unchanged => f.write_str("unchanged"),
            ReconcileOutcome::Deferred => f.write_str("deferred"),
            ReconcileOutcome::Removed => f.write_str("removed"),
            ReconcileOutcome::Skipped => f.write_str("skipped"),
            ReconcileOutcome::Failed => f.write_str("failed"),
        }
    }
}
