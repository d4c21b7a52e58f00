use super::updated;
use crate::{ReconcileOutcome, SyncResult};
use mapsync_diff::{SourceOp, diff_source};
use mapsync_engine::StyleEngine;
use mapsync_model::SourceProps;
use tracing::debug;

/// Creates the source if it is not live, otherwise applies the diff from
/// `prev` to `next`.
pub(crate) fn reconcile<E: StyleEngine + ?Sized>(
    engine: &mut E,
    ready: bool,
    id: &str,
    prev: &SourceProps,
    next: &SourceProps,
) -> SyncResult<ReconcileOutcome> {
    if !ready {
        return Ok(ReconcileOutcome::Deferred);
    }

    let Some(live) = engine.get_source(id) else {
        engine.add_source(id, &next.to_spec())?;
        debug!(source = id, source_type = next.source_type.as_str(), "source created");
        return Ok(ReconcileOutcome::Created);
    };

    let ops = diff_source(id, prev, next, live.supports_tile_updates)?;
    for op in &ops {
        apply(engine, id, op)?;
    }
    Ok(updated(ops.len()))
}

fn apply<E: StyleEngine + ?Sized>(engine: &mut E, id: &str, op: &SourceOp) -> SyncResult<()> {
    debug!(source = id, ?op, "applying source op");
    match op {
        SourceOp::SetData(data) => engine.set_source_data(id, data)?,
        SourceOp::SetCoordinates(coordinates) => engine.set_source_coordinates(id, coordinates)?,
        SourceOp::UpdateImage { url, coordinates } => {
            engine.update_image(id, url.as_ref(), coordinates.as_ref())?
        }
        SourceOp::SetUrl(url) => engine.set_source_url(id, url)?,
        SourceOp::SetTiles(tiles) => engine.set_source_tiles(id, tiles)?,
    }
    Ok(())
}

/// Removes every live layer using the source, then the source.
///
/// Dependent layers are removed here even if their own synchronizers have
/// not torn down yet. Nothing happens unless the style is ready and the
/// source is live.
pub(crate) fn teardown<E: StyleEngine + ?Sized>(
    engine: &mut E,
    ready: bool,
    id: &str,
) -> SyncResult<ReconcileOutcome> {
    if !ready || engine.get_source(id).is_none() {
        return Ok(ReconcileOutcome::Skipped);
    }

    for layer in engine.style_layers() {
        if layer.source.as_deref() == Some(id) {
            debug!(source = id, layer = %layer.id, "removing dependent layer");
            engine.remove_layer(&layer.id)?;
        }
    }
    engine.remove_source(id)?;
    debug!(source = id, "source removed");
    Ok(ReconcileOutcome::Removed)
}
