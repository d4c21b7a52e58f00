use crate::{ReconcileOutcome, SyncResult};
use mapsync_engine::ControlEngine;
use mapsync_model::ControlProps;
use tracing::debug;

/// Adds the control unless the map already has it.
pub(crate) fn add<E: ControlEngine + ?Sized>(
    engine: &mut E,
    id: &str,
    props: &ControlProps,
) -> SyncResult<ReconcileOutcome> {
    if engine.has_control(id) {
        return Ok(ReconcileOutcome::Unchanged);
    }
    engine.add_control(id, &props.to_spec(), props.position)?;
    debug!(control = id, control_type = props.control_type.as_str(), "control added");
    Ok(ReconcileOutcome::Created)
}

/// Controls cannot be reconfigured in place: a changed declaration is
/// applied as remove-then-add.
pub(crate) fn reconcile<E: ControlEngine + ?Sized>(
    engine: &mut E,
    id: &str,
    prev: &ControlProps,
    next: &ControlProps,
) -> SyncResult<ReconcileOutcome> {
    if prev == next {
        return add(engine, id, next);
    }
    let mut ops = 1;
    if engine.has_control(id) {
        engine.remove_control(id)?;
        ops += 1;
    }
    engine.add_control(id, &next.to_spec(), next.position)?;
    debug!(control = id, "control replaced");
    Ok(ReconcileOutcome::Updated { ops })
}

pub(crate) fn teardown<E: ControlEngine + ?Sized>(
    engine: &mut E,
    id: &str,
) -> SyncResult<ReconcileOutcome> {
    if !engine.has_control(id) {
        return Ok(ReconcileOutcome::Skipped);
    }
    engine.remove_control(id)?;
    debug!(control = id, "control removed");
    Ok(ReconcileOutcome::Removed)
}
