//! Per-kind synchronizers.
//!
//! Each module owns the create/update/destroy calls for one entity kind.
//! Functions return a [`ReconcileOutcome`](crate::ReconcileOutcome) or a
//! [`SyncError`](crate::SyncError); the caller turns errors into
//! diagnostics.

pub(crate) mod control;
pub(crate) mod layer;
pub(crate) mod marker;
pub(crate) mod popup;
pub(crate) mod source;

use crate::ReconcileOutcome;

fn updated(ops: usize) -> ReconcileOutcome {
    if ops == 0 {
        ReconcileOutcome::Unchanged
    } else {
        ReconcileOutcome::Updated { ops }
    }
}
