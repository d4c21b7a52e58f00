//! Layer diff.

use crate::{DiffError, DiffResult};
use mapsync_model::{LayerProps, PropertyMap, deep_equal, deep_equal_opt};
use serde::Serialize;
use serde_json::Value;

/// An update to a live layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum LayerOp {
    /// Move the layer before `before_id`, or to the top when `None`.
    Move { before_id: Option<String> },
    /// Set a layout property; `None` resets it.
    SetLayoutProperty { key: String, value: Option<Value> },
    /// Set a paint property; `None` resets it.
    SetPaintProperty { key: String, value: Option<Value> },
    /// Replace the filter; `None` clears it.
    SetFilter(Option<Value>),
    SetZoomRange { min: f64, max: f64 },
}

/// Computes the operations that turn layer `id` declared as `prev` into
/// `next`.
///
/// Operations come out in this order: move, layout, paint, filter, zoom
/// range. A move always comes first so property changes land on the layer
/// at its final position. Custom layers on either side produce nothing.
///
/// # Errors
///
/// [`DiffError::IdChanged`] or [`DiffError::TypeChanged`] when identity
/// changed. [`DiffError::Unresolvable`] when `source` or `source-layer`
/// changed, since a live layer cannot be re-pointed.
pub fn diff_layer(id: &str, prev: &LayerProps, next: &LayerProps) -> DiffResult<Vec<LayerOp>> {
    if prev.id != next.id {
        return Err(DiffError::IdChanged {
            kind: "layer",
            previous: prev.id.clone(),
            next: next.id.clone(),
        });
    }
    if prev.layer_type != next.layer_type {
        return Err(DiffError::TypeChanged {
            kind: "layer",
            id: id.to_string(),
            previous: prev.layer_type.clone(),
            next: next.layer_type.clone(),
        });
    }
    if prev.is_custom() || next.is_custom() {
        return Ok(Vec::new());
    }

    let mut repointed = Vec::new();
    if prev.source != next.source {
        repointed.push("source".to_string());
    }
    if prev.source_layer != next.source_layer {
        repointed.push("source-layer".to_string());
    }
    if !repointed.is_empty() {
        return Err(DiffError::Unresolvable {
            kind: "layer",
            id: id.to_string(),
            keys: repointed,
        });
    }

    let mut ops = Vec::new();

    if prev.before_id != next.before_id {
        ops.push(LayerOp::Move {
            before_id: next.before_id.clone(),
        });
    }

    diff_properties(&prev.layout, &next.layout, &mut ops, |key, value| {
        LayerOp::SetLayoutProperty { key, value }
    });
    diff_properties(&prev.paint, &next.paint, &mut ops, |key, value| {
        LayerOp::SetPaintProperty { key, value }
    });

    if !deep_equal_opt(prev.filter.as_ref(), next.filter.as_ref()) {
        ops.push(LayerOp::SetFilter(next.filter.clone()));
    }

    if let (Some(min), Some(max)) = (next.minzoom, next.maxzoom) {
        if prev.minzoom != Some(min) || prev.maxzoom != Some(max) {
            ops.push(LayerOp::SetZoomRange { min, max });
        }
    }

    Ok(ops)
}

/// Sets keys that are new or changed, then clears keys that disappeared.
fn diff_properties(
    prev: &PropertyMap,
    next: &PropertyMap,
    ops: &mut Vec<LayerOp>,
    make: impl Fn(String, Option<Value>) -> LayerOp,
) {
    for (key, value) in next {
        let unchanged = prev.get(key).is_some_and(|old| deep_equal(old, value));
        if !unchanged {
            ops.push(make(key.clone(), Some(value.clone())));
        }
    }
    for key in prev.keys() {
        if !next.contains_key(key) {
            ops.push(make(key.clone(), None));
        }
    }
}
