use super::updated;
use crate::{ReconcileOutcome, SyncResult};
use mapsync_engine::MarkerEngine;
use mapsync_model::{MarkerProps, points_equal};
use tracing::debug;

/// Creates the marker, or pushes every declared field that disagrees with
/// the live marker.
///
/// Fields are compared against live state rather than the previous
/// declaration, so a position the user dragged to is only overwritten when
/// the declaration says otherwise.
pub(crate) fn reconcile<E: MarkerEngine + ?Sized>(
    engine: &mut E,
    id: &str,
    next: &MarkerProps,
) -> SyncResult<ReconcileOutcome> {
    let Some(live) = engine.marker(id) else {
        engine.add_marker(id, next)?;
        debug!(marker = id, "marker created");
        return Ok(ReconcileOutcome::Created);
    };

    let mut ops = 0;

    let lng_lat = next.lng_lat();
    if live.lng_lat != lng_lat {
        engine.set_marker_lng_lat(id, lng_lat)?;
        ops += 1;
    }
    if let Some(offset) = next.offset {
        if !points_equal(live.offset, offset) {
            engine.set_marker_offset(id, offset)?;
            ops += 1;
        }
    }
    if let Some(draggable) = next.draggable {
        if live.draggable != draggable {
            engine.set_marker_draggable(id, draggable)?;
            ops += 1;
        }
    }
    if let Some(rotation) = next.rotation {
        if live.rotation != rotation {
            engine.set_marker_rotation(id, rotation)?;
            ops += 1;
        }
    }
    if let Some(alignment) = next.rotation_alignment {
        if live.rotation_alignment != alignment {
            engine.set_marker_rotation_alignment(id, alignment)?;
            ops += 1;
        }
    }
    if let Some(alignment) = next.pitch_alignment {
        if live.pitch_alignment != alignment {
            engine.set_marker_pitch_alignment(id, alignment)?;
            ops += 1;
        }
    }
    if live.popup != next.popup {
        engine.set_marker_popup(id, next.popup.as_deref())?;
        ops += 1;
    }

    Ok(updated(ops))
}

pub(crate) fn teardown<E: MarkerEngine + ?Sized>(
    engine: &mut E,
    id: &str,
) -> SyncResult<ReconcileOutcome> {
    if engine.marker(id).is_none() {
        return Ok(ReconcileOutcome::Skipped);
    }
    engine.remove_marker(id)?;
    debug!(marker = id, "marker removed");
    Ok(ReconcileOutcome::Removed)
}
