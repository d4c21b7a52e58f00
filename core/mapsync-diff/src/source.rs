//! Source diff.

use crate::{DiffError, DiffResult};
use mapsync_model::{PropertyMap, SourceProps, SourceType, deep_equal_opt};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// An incremental update to a live source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum SourceOp {
    /// Replace the data of a GeoJSON source.
    SetData(Value),
    /// Move an image, video or canvas source.
    SetCoordinates(Value),
    /// Reload an image source with its declared url and coordinates.
    UpdateImage {
        url: Option<Value>,
        coordinates: Option<Value>,
    },
    SetUrl(String),
    SetTiles(Vec<String>),
}

/// Option keys whose values differ between two option maps, in key order.
///
/// A key present on one side only counts as changed.
pub fn changed_keys(prev: &PropertyMap, next: &PropertyMap) -> Vec<String> {
    let keys: BTreeSet<&String> = prev.keys().chain(next.keys()).collect();
    keys.into_iter()
        .filter(|key| !deep_equal_opt(prev.get(*key), next.get(*key)))
        .cloned()
        .collect()
}

/// Computes the update from `prev` to `next` for the live source `id`.
///
/// At most one operation is produced. An empty list means nothing changed.
/// `supports_tile_updates` reports whether the live source accepts
/// incremental `url`/`tiles` changes. Those changes are applied in place for
/// `raster` and `raster-dem` sources as well as `vector`.
///
/// # Errors
///
/// [`DiffError::IdChanged`] / [`DiffError::TypeChanged`] when identity
/// changed, [`DiffError::Unresolvable`] when the changed keys have no
/// incremental update for this source type.
pub fn diff_source(
    id: &str,
    prev: &SourceProps,
    next: &SourceProps,
    supports_tile_updates: bool,
) -> DiffResult<Vec<SourceOp>> {
    if prev.id != next.id {
        return Err(DiffError::IdChanged {
            kind: "source",
            previous: prev.id.clone(),
            next: next.id.clone(),
        });
    }
    if prev.source_type != next.source_type {
        return Err(DiffError::TypeChanged {
            kind: "source",
            id: id.to_string(),
            previous: prev.source_type.as_str().to_string(),
            next: next.source_type.as_str().to_string(),
        });
    }

    let keys = changed_keys(&prev.options, &next.options);
    if keys.is_empty() {
        return Ok(Vec::new());
    }
    debug!(source = id, ?keys, "source options changed");

    let only = |key: &str| keys.len() == 1 && keys[0] == key;
    let op = match &next.source_type {
        SourceType::Geojson if only("data") => next.option("data").cloned().map(SourceOp::SetData),
        SourceType::Image if keys.iter().all(|k| k == "url" || k == "coordinates") => {
            Some(SourceOp::UpdateImage {
                url: next.option("url").cloned(),
                coordinates: next.option("coordinates").cloned(),
            })
        }
        SourceType::Video | SourceType::Canvas if only("coordinates") => next
            .option("coordinates")
            .cloned()
            .map(SourceOp::SetCoordinates),
        SourceType::Vector | SourceType::Raster | SourceType::RasterDem
            if supports_tile_updates && only("url") =>
        {
            next.option("url")
                .and_then(Value::as_str)
                .map(|url| SourceOp::SetUrl(url.to_string()))
        }
        SourceType::Vector | SourceType::Raster | SourceType::RasterDem
            if supports_tile_updates && only("tiles") =>
        {
            next.option("tiles").and_then(tile_list).map(SourceOp::SetTiles)
        }
        _ => None,
    };

    op.map(|op| vec![op])
        .ok_or_else(|| DiffError::Unresolvable {
            kind: "source",
            id: id.to_string(),
            keys,
        })
}

fn tile_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|tile| tile.as_str().map(str::to_string))
        .collect()
}
