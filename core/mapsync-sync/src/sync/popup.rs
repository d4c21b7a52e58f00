use super::updated;
use crate::{ReconcileOutcome, SyncResult};
use mapsync_engine::PopupEngine;
use mapsync_model::{PopupProps, class_list};
use tracing::debug;

/// Opens the popup on first mount.
pub(crate) fn open<E: PopupEngine + ?Sized>(
    engine: &mut E,
    id: &str,
    props: &PopupProps,
) -> SyncResult<ReconcileOutcome> {
    if engine.popup(id).is_some() {
        return Ok(ReconcileOutcome::Unchanged);
    }
    engine.add_popup(id, props)?;
    debug!(popup = id, "popup opened");
    Ok(ReconcileOutcome::Created)
}

/// Brings an open popup in line with `next`. A closed popup stays closed.
pub(crate) fn reconcile<E: PopupEngine + ?Sized>(
    engine: &mut E,
    id: &str,
    next: &PopupProps,
) -> SyncResult<ReconcileOutcome> {
    let Some(live) = engine.popup(id) else {
        return Ok(ReconcileOutcome::Skipped);
    };

    let mut ops = 0;

    let lng_lat = next.lng_lat();
    if live.lng_lat != lng_lat {
        engine.set_popup_lng_lat(id, lng_lat)?;
        ops += 1;
    }
    if let Some(offset) = &next.offset {
        if live.offset.as_ref() != Some(offset) {
            engine.set_popup_offset(id, offset)?;
            ops += 1;
        }
    }
    if live.anchor != next.anchor {
        engine.set_popup_anchor(id, next.anchor)?;
        ops += 1;
    }
    if let Some(max_width) = next.max_width.as_deref() {
        if live.max_width != max_width {
            engine.set_popup_max_width(id, max_width)?;
            ops += 1;
        }
    }

    let wanted = class_list(next.class_name.as_deref());
    for class in live.class_list.difference(&wanted) {
        engine.remove_popup_class_name(id, class)?;
        ops += 1;
    }
    for class in wanted.difference(&live.class_list) {
        engine.add_popup_class_name(id, class)?;
        ops += 1;
    }

    Ok(updated(ops))
}

/// Removes the popup if it is still open.
pub(crate) fn teardown<E: PopupEngine + ?Sized>(
    engine: &mut E,
    id: &str,
) -> SyncResult<ReconcileOutcome> {
    if engine.popup(id).is_none() {
        return Ok(ReconcileOutcome::Skipped);
    }
    engine.remove_popup(id)?;
    debug!(popup = id, "popup removed");
    Ok(ReconcileOutcome::Removed)
}
