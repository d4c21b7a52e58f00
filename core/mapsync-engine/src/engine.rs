//! Capability traits of the map-rendering engine.

use crate::EngineResult;
use mapsync_model::{ControlSpec, LayerSpec, MarkerProps, PopupOffset, PopupProps, SourceSpec, SourceType};
use mapsync_types::{
    Alignment, Anchor, ControlPosition, LngLat, LngLatBounds, Padding, Point,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// What the engine reports about a live source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: String,
    pub source_type: SourceType,
    /// Whether the live source accepts incremental `url`/`tiles` updates.
    pub supports_tile_updates: bool,
}

/// What the engine reports about a live layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub id: String,
    pub layer_type: String,
    pub source: Option<String>,
}

/// Style document operations.
///
/// Every mutation is illegal while [`is_style_loaded`](Self::is_style_loaded)
/// is false; callers must check it first.
pub trait StyleEngine {
    /// Whether the style document is loaded and mutable.
    fn is_style_loaded(&self) -> bool;

    fn add_source(&mut self, id: &str, spec: &SourceSpec) -> EngineResult<()>;
    fn remove_source(&mut self, id: &str) -> EngineResult<()>;
    fn get_source(&self, id: &str) -> Option<SourceInfo>;

    /// Adds a layer, inserted before `before_id` or on top when `None`.
    fn add_layer(&mut self, spec: &LayerSpec, before_id: Option<&str>) -> EngineResult<()>;
    fn remove_layer(&mut self, id: &str) -> EngineResult<()>;
    fn get_layer(&self, id: &str) -> Option<LayerInfo>;
    /// All layers of the style, bottom to top.
    fn style_layers(&self) -> Vec<LayerInfo>;
    fn move_layer(&mut self, id: &str, before_id: Option<&str>) -> EngineResult<()>;

    /// `None` clears the filter.
    fn set_filter(&mut self, id: &str, filter: Option<&Value>) -> EngineResult<()>;
    /// `None` resets the property to its default.
    fn set_layout_property(&mut self, id: &str, key: &str, value: Option<&Value>)
    -> EngineResult<()>;
    /// `None` resets the property to its default.
    fn set_paint_property(&mut self, id: &str, key: &str, value: Option<&Value>)
    -> EngineResult<()>;
    fn set_layer_zoom_range(&mut self, id: &str, minzoom: f64, maxzoom: f64) -> EngineResult<()>;

    /// Replaces the data of a GeoJSON source.
    fn set_source_data(&mut self, id: &str, data: &Value) -> EngineResult<()>;
    /// Moves an image, video or canvas source.
    fn set_source_coordinates(&mut self, id: &str, coordinates: &Value) -> EngineResult<()>;
    /// Reloads an image source.
    fn update_image(
        &mut self,
        id: &str,
        url: Option<&Value>,
        coordinates: Option<&Value>,
    ) -> EngineResult<()>;
    fn set_source_url(&mut self, id: &str, url: &str) -> EngineResult<()>;
    fn set_source_tiles(&mut self, id: &str, tiles: &[String]) -> EngineResult<()>;
}

/// Live state of a marker as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerState {
    pub lng_lat: LngLat,
    pub offset: Point,
    pub anchor: Anchor,
    pub draggable: bool,
    pub rotation: f64,
    pub rotation_alignment: Alignment,
    pub pitch_alignment: Alignment,
    pub popup: Option<String>,
}

/// Marker overlays. Markers are not part of the style document.
pub trait MarkerEngine {
    /// Creates the marker from its declared options and adds it to the map.
    fn add_marker(&mut self, id: &str, props: &MarkerProps) -> EngineResult<()>;
    fn remove_marker(&mut self, id: &str) -> EngineResult<()>;
    fn marker(&self, id: &str) -> Option<MarkerState>;

    fn set_marker_lng_lat(&mut self, id: &str, lng_lat: LngLat) -> EngineResult<()>;
    fn set_marker_offset(&mut self, id: &str, offset: Point) -> EngineResult<()>;
    fn set_marker_draggable(&mut self, id: &str, draggable: bool) -> EngineResult<()>;
    fn set_marker_rotation(&mut self, id: &str, rotation: f64) -> EngineResult<()>;
    fn set_marker_rotation_alignment(&mut self, id: &str, alignment: Alignment)
    -> EngineResult<()>;
    fn set_marker_pitch_alignment(&mut self, id: &str, alignment: Alignment) -> EngineResult<()>;
    /// Binds (or with `None` unbinds) a popup to the marker.
    fn set_marker_popup(&mut self, id: &str, popup: Option<&str>) -> EngineResult<()>;
}

/// Live state of an open popup as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopupState {
    pub lng_lat: LngLat,
    pub anchor: Option<Anchor>,
    pub offset: Option<PopupOffset>,
    pub max_width: String,
    pub class_list: BTreeSet<String>,
}

/// Popup overlays. Popups are not part of the style document.
pub trait PopupEngine {
    /// Creates the popup and opens it on the map.
    fn add_popup(&mut self, id: &str, props: &PopupProps) -> EngineResult<()>;
    fn remove_popup(&mut self, id: &str) -> EngineResult<()>;
    /// State of the popup, `None` if it is not open on the map.
    fn popup(&self, id: &str) -> Option<PopupState>;

    fn set_popup_lng_lat(&mut self, id: &str, lng_lat: LngLat) -> EngineResult<()>;
    fn set_popup_offset(&mut self, id: &str, offset: &PopupOffset) -> EngineResult<()>;
    fn set_popup_anchor(&mut self, id: &str, anchor: Option<Anchor>) -> EngineResult<()>;
    fn set_popup_max_width(&mut self, id: &str, max_width: &str) -> EngineResult<()>;
    fn add_popup_class_name(&mut self, id: &str, class_name: &str) -> EngineResult<()>;
    fn remove_popup_class_name(&mut self, id: &str, class_name: &str) -> EngineResult<()>;
}

/// UI controls.
pub trait ControlEngine {
    fn has_control(&self, id: &str) -> bool;
    fn add_control(
        &mut self,
        id: &str,
        spec: &ControlSpec,
        position: Option<ControlPosition>,
    ) -> EngineResult<()>;
    fn remove_control(&mut self, id: &str) -> EngineResult<()>;
}

/// Read access to the engine's own camera.
///
/// The engine commits camera changes on its own schedule; these values may
/// lag behind the map wrapper's shadow transform.
pub trait CameraEngine {
    fn center(&self) -> LngLat;
    fn zoom(&self) -> f64;
    fn bearing(&self) -> f64;
    fn pitch(&self) -> f64;
    fn padding(&self) -> Padding;
    fn bounds(&self) -> LngLatBounds;
    fn project(&self, lng_lat: LngLat) -> Point;
    fn unproject(&self, point: Point) -> LngLat;
}

/// A complete map-rendering engine.
pub trait MapEngine: StyleEngine + MarkerEngine + PopupEngine + ControlEngine + CameraEngine {}

impl<T> MapEngine for T where T: StyleEngine + MarkerEngine + PopupEngine + ControlEngine + CameraEngine {}
