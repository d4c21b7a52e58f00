//! Layer declarations.

use crate::PropertyMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Layer type whose rendering is owned by caller-supplied hooks; such
/// layers are never diffed.
pub const CUSTOM_LAYER_TYPE: &str = "custom";

/// Declared properties of a style layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(
        rename = "source-layer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_layer: Option<String>,
    /// Insert the layer before this layer id; appended on top if absent.
    #[serde(rename = "beforeId", default, skip_serializing_if = "Option::is_none")]
    pub before_id: Option<String>,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub layout: PropertyMap,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub paint: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    /// Remaining layer keys (`metadata`, ...), passed through at creation.
    #[serde(flatten)]
    pub extra: PropertyMap,
}

impl LayerProps {
    /// Creates an unnamed layer of the given type.
    pub fn new(layer_type: impl Into<String>) -> Self {
        Self {
            layer_type: layer_type.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_before_id(mut self, before_id: impl Into<String>) -> Self {
        self.before_id = Some(before_id.into());
        self
    }

    #[must_use]
    pub fn with_layout(mut self, key: impl Into<String>, value: Value) -> Self {
        self.layout.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_paint(mut self, key: impl Into<String>, value: Value) -> Self {
        self.paint.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_zoom_range(mut self, minzoom: f64, maxzoom: f64) -> Self {
        self.minzoom = Some(minzoom);
        self.maxzoom = Some(maxzoom);
        self
    }

    /// Returns true for layers rendered by caller-supplied hooks.
    pub fn is_custom(&self) -> bool {
        self.layer_type == CUSTOM_LAYER_TYPE
    }

    /// Builds the engine descriptor under the resolved `id`; `before_id` is
    /// passed to the engine separately.
    pub fn to_spec(&self, id: &str) -> LayerSpec {
        LayerSpec {
            id: id.to_string(),
            layer_type: self.layer_type.clone(),
            source: self.source.clone(),
            source_layer: self.source_layer.clone(),
            layout: self.layout.clone(),
            paint: self.paint.clone(),
            filter: self.filter.clone(),
            minzoom: self.minzoom,
            maxzoom: self.maxzoom,
            extra: self.extra.clone(),
        }
    }
}

/// Layer descriptor handed to the engine's `add_layer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(
        rename = "source-layer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_layer: Option<String>,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub layout: PropertyMap,
    #[serde(default, skip_serializing_if = "PropertyMap::is_empty")]
    pub paint: PropertyMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    #[serde(flatten)]
    pub extra: PropertyMap,
}
