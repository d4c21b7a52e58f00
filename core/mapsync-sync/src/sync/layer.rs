use super::updated;
use crate::{ReconcileOutcome, SyncResult};
use mapsync_diff::{LayerOp, diff_layer};
use mapsync_engine::StyleEngine;
use mapsync_model::LayerProps;
use tracing::debug;

/// Creates the layer once its source is live, otherwise applies the diff
/// from `prev` to `next`. Stops at the first failing engine call.
pub(crate) fn reconcile<E: StyleEngine + ?Sized>(
    engine: &mut E,
    ready: bool,
    id: &str,
    prev: &LayerProps,
    next: &LayerProps,
) -> SyncResult<ReconcileOutcome> {
    if !ready {
        return Ok(ReconcileOutcome::Deferred);
    }

    if engine.get_layer(id).is_none() {
        if let Some(source) = next.source.as_deref() {
            if engine.get_source(source).is_none() {
                debug!(layer = id, source, "waiting for source");
                return Ok(ReconcileOutcome::Deferred);
            }
        }
        // A before-layer that is not live yet puts the layer on top.
        let before_id = next
            .before_id
            .as_deref()
            .filter(|before| engine.get_layer(before).is_some());
        engine.add_layer(&next.to_spec(id), before_id)?;
        debug!(layer = id, ?before_id, "layer created");
        return Ok(ReconcileOutcome::Created);
    }

    let ops = diff_layer(id, prev, next)?;
    for op in &ops {
        apply(engine, id, op)?;
    }
    Ok(updated(ops.len()))
}

fn apply<E: StyleEngine + ?Sized>(engine: &mut E, id: &str, op: &LayerOp) -> SyncResult<()> {
    debug!(layer = id, ?op, "applying layer op");
    match op {
        LayerOp::Move { before_id } => engine.move_layer(id, before_id.as_deref())?,
        LayerOp::SetLayoutProperty { key, value } => {
            engine.set_layout_property(id, key, value.as_ref())?
        }
        LayerOp::SetPaintProperty { key, value } => {
            engine.set_paint_property(id, key, value.as_ref())?
        }
        LayerOp::SetFilter(filter) => engine.set_filter(id, filter.as_ref())?,
        LayerOp::SetZoomRange { min, max } => engine.set_layer_zoom_range(id, *min, *max)?,
    }
    Ok(())
}

/// Removes the layer if the style is ready and the layer is live.
pub(crate) fn teardown<E: StyleEngine + ?Sized>(
    engine: &mut E,
    ready: bool,
    id: &str,
) -> SyncResult<ReconcileOutcome> {
    if !ready || engine.get_layer(id).is_none() {
        return Ok(ReconcileOutcome::Skipped);
    }
    engine.remove_layer(id)?;
    debug!(layer = id, "layer removed");
    Ok(ReconcileOutcome::Removed)
}
