//! Headless in-memory engine.
//!
//! `MemoryEngine` keeps the style document, overlays and controls in plain
//! collections, enforces the legality rules of a real engine, and records
//! every successful mutation in a call log. Use it to verify reconciliation
//! without a renderer.

use crate::{
    CameraEngine, ControlEngine, EngineCall, EngineError, EngineResult, LayerInfo, MarkerEngine,
    MarkerState, PopupEngine, PopupState, SourceInfo, StyleEngine, Transform,
};
use mapsync_model::{
    ControlSpec, LayerSpec, MarkerProps, PopupOffset, PopupProps, SourceSpec, SourceType,
    class_list, DEFAULT_POPUP_MAX_WIDTH,
};
use mapsync_types::{
    Alignment, Anchor, ControlPosition, LngLat, LngLatBounds, Padding, Point,
};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A live control and where it was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlEntry {
    pub spec: ControlSpec,
    pub position: Option<ControlPosition>,
}

/// In-memory engine for tests and scenario replay.
#[derive(Debug)]
pub struct MemoryEngine {
    style_loaded: bool,
    sources: BTreeMap<String, SourceSpec>,
    /// Bottom to top.
    layers: Vec<LayerSpec>,
    markers: BTreeMap<String, MarkerState>,
    popups: BTreeMap<String, PopupState>,
    controls: BTreeMap<String, ControlEntry>,
    transform: Transform,
    supports_tile_updates: bool,
    /// Method names whose next call fails.
    fail_next: BTreeSet<String>,
    calls: Vec<EngineCall>,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// Creates an engine whose style is still loading.
    pub fn new() -> Self {
        Self {
            style_loaded: false,
            sources: BTreeMap::new(),
            layers: Vec::new(),
            markers: BTreeMap::new(),
            popups: BTreeMap::new(),
            controls: BTreeMap::new(),
            transform: Transform::default(),
            supports_tile_updates: true,
            fail_next: BTreeSet::new(),
            calls: Vec::new(),
        }
    }

    /// Creates an engine with a loaded, empty style.
    pub fn loaded() -> Self {
        let mut engine = Self::new();
        engine.style_loaded = true;
        engine
    }

    /// Completes the pending style load.
    pub fn finish_style_load(&mut self) {
        debug!("style load finished");
        self.style_loaded = true;
    }

    /// Starts a style reload: the style document is discarded and the style
    /// stays unloaded until [`finish_style_load`](Self::finish_style_load).
    /// Markers, popups and controls are not part of the style and survive.
    pub fn begin_style_reload(&mut self) {
        debug!(
            sources = self.sources.len(),
            layers = self.layers.len(),
            "style reload started"
        );
        self.style_loaded = false;
        self.sources.clear();
        self.layers.clear();
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Drains the call log.
    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn source_spec(&self, id: &str) -> Option<&SourceSpec> {
        self.sources.get(id)
    }

    pub fn layer_spec(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layer ids, bottom to top.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    pub fn control(&self, id: &str) -> Option<&ControlEntry> {
        self.controls.get(id)
    }

    /// Simulates the user dragging a marker. Not recorded in the call log.
    pub fn drag_marker(&mut self, id: &str, lng_lat: LngLat) -> EngineResult<()> {
        let marker = self
            .markers
            .get_mut(id)
            .ok_or_else(|| EngineError::MarkerNotFound(id.to_string()))?;
        marker.lng_lat = lng_lat;
        Ok(())
    }

    /// Simulates the user closing a popup. Not recorded in the call log.
    pub fn close_popup(&mut self, id: &str) -> EngineResult<()> {
        self.popups
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::PopupNotFound(id.to_string()))
    }

    /// Whether newly added tiled sources accept `url`/`tiles` updates.
    pub fn set_supports_tile_updates(&mut self, supported: bool) {
        self.supports_tile_updates = supported;
    }

    /// Makes the next call to `method` (e.g. `"set_paint_property"`) fail
    /// with [`EngineError::Rejected`].
    pub fn fail_on(&mut self, method: impl Into<String>) {
        self.fail_next.insert(method.into());
    }

    /// The engine's own camera.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn injected(&mut self, method: &str) -> EngineResult<()> {
        if self.fail_next.remove(method) {
            return Err(EngineError::Rejected(format!("injected failure in {method}")));
        }
        Ok(())
    }

    fn check_style(&mut self, method: &str) -> EngineResult<()> {
        self.injected(method)?;
        if !self.style_loaded {
            return Err(EngineError::StyleNotLoaded);
        }
        Ok(())
    }

    fn layer_index(&self, id: &str) -> EngineResult<usize> {
        self.layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| EngineError::LayerNotFound(id.to_string()))
    }

    fn layer_mut(&mut self, id: &str) -> EngineResult<&mut LayerSpec> {
        let index = self.layer_index(id)?;
        Ok(&mut self.layers[index])
    }

    /// Position at which a layer inserted before `before_id` lands.
    fn insertion_index(&self, before_id: Option<&str>) -> EngineResult<usize> {
        match before_id {
            Some(before) => self.layer_index(before),
            None => Ok(self.layers.len()),
        }
    }

    fn source_of_type(
        &mut self,
        id: &str,
        operation: &str,
        allowed: &[SourceType],
    ) -> EngineResult<&mut SourceSpec> {
        let spec = self
            .sources
            .get_mut(id)
            .ok_or_else(|| EngineError::SourceNotFound(id.to_string()))?;
        if !allowed.contains(&spec.source_type) {
            return Err(EngineError::UnsupportedOperation {
                operation: operation.to_string(),
                target: format!("{} source {id}", spec.source_type.as_str()),
            });
        }
        Ok(spec)
    }

    fn tiled_source(&mut self, id: &str, operation: &str) -> EngineResult<&mut SourceSpec> {
        if !self.supports_tile_updates {
            return Err(EngineError::UnsupportedOperation {
                operation: operation.to_string(),
                target: format!("source {id}"),
            });
        }
        self.source_of_type(
            id,
            operation,
            &[SourceType::Vector, SourceType::Raster, SourceType::RasterDem],
        )
    }

    fn marker_mut(&mut self, method: &str, id: &str) -> EngineResult<&mut MarkerState> {
        self.injected(method)?;
        self.markers
            .get_mut(id)
            .ok_or_else(|| EngineError::MarkerNotFound(id.to_string()))
    }

    fn popup_mut(&mut self, method: &str, id: &str) -> EngineResult<&mut PopupState> {
        self.injected(method)?;
        self.popups
            .get_mut(id)
            .ok_or_else(|| EngineError::PopupNotFound(id.to_string()))
    }

    fn record(&mut self, call: EngineCall) {
        debug!(method = call.method(), target = call.target(), "engine call");
        self.calls.push(call);
    }
}

fn set_or_clear(map: &mut serde_json::Map<String, Value>, key: &str, value: Option<&Value>) {
    match value {
        Some(value) => {
            map.insert(key.to_string(), value.clone());
        }
        None => {
            map.remove(key);
        }
    }
}

impl StyleEngine for MemoryEngine {
    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn add_source(&mut self, id: &str, spec: &SourceSpec) -> EngineResult<()> {
        self.check_style("add_source")?;
        if self.sources.contains_key(id) {
            return Err(EngineError::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), spec.clone());
        self.record(EngineCall::AddSource { id: id.to_string() });
        Ok(())
    }

    fn remove_source(&mut self, id: &str) -> EngineResult<()> {
        self.check_style("remove_source")?;
        if !self.sources.contains_key(id) {
            return Err(EngineError::SourceNotFound(id.to_string()));
        }
        if let Some(layer) = self
            .layers
            .iter()
            .find(|l| l.source.as_deref() == Some(id))
        {
            return Err(EngineError::SourceInUse {
                source_id: id.to_string(),
                layer_id: layer.id.clone(),
            });
        }
        self.sources.remove(id);
        self.record(EngineCall::RemoveSource { id: id.to_string() });
        Ok(())
    }

    fn get_source(&self, id: &str) -> Option<SourceInfo> {
        self.sources.get(id).map(|spec| SourceInfo {
            id: id.to_string(),
            source_type: spec.source_type.clone(),
            supports_tile_updates: self.supports_tile_updates
                && matches!(
                    spec.source_type,
                    SourceType::Vector | SourceType::Raster | SourceType::RasterDem
                ),
        })
    }

    fn add_layer(&mut self, spec: &LayerSpec, before_id: Option<&str>) -> EngineResult<()> {
        self.check_style("add_layer")?;
        if self.layer_index(&spec.id).is_ok() {
            return Err(EngineError::DuplicateLayer(spec.id.clone()));
        }
        if let Some(source) = &spec.source {
            if !self.sources.contains_key(source) {
                return Err(EngineError::SourceNotFound(source.clone()));
            }
        }
        let index = self.insertion_index(before_id)?;
        self.layers.insert(index, spec.clone());
        self.record(EngineCall::AddLayer {
            id: spec.id.clone(),
            before_id: before_id.map(str::to_string),
        });
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> EngineResult<()> {
        self.check_style("remove_layer")?;
        let index = self.layer_index(id)?;
        self.layers.remove(index);
        self.record(EngineCall::RemoveLayer { id: id.to_string() });
        Ok(())
    }

    fn get_layer(&self, id: &str) -> Option<LayerInfo> {
        self.layer_spec(id).map(layer_info)
    }

    fn style_layers(&self) -> Vec<LayerInfo> {
        self.layers.iter().map(layer_info).collect()
    }

    fn move_layer(&mut self, id: &str, before_id: Option<&str>) -> EngineResult<()> {
        self.check_style("move_layer")?;
        let index = self.layer_index(id)?;
        if before_id == Some(id) {
            return Err(EngineError::Rejected(format!("cannot move layer {id} before itself")));
        }
        // Validate the target before detaching the layer.
        self.insertion_index(before_id)?;
        let layer = self.layers.remove(index);
        let target = match self.insertion_index(before_id) {
            Ok(target) => target,
            Err(e) => {
                self.layers.insert(index, layer);
                return Err(e);
            }
        };
        self.layers.insert(target, layer);
        self.record(EngineCall::MoveLayer {
            id: id.to_string(),
            before_id: before_id.map(str::to_string),
        });
        Ok(())
    }

    fn set_filter(&mut self, id: &str, filter: Option<&Value>) -> EngineResult<()> {
        self.check_style("set_filter")?;
        self.layer_mut(id)?.filter = filter.cloned();
        self.record(EngineCall::SetFilter { id: id.to_string() });
        Ok(())
    }

    fn set_layout_property(
        &mut self,
        id: &str,
        key: &str,
        value: Option<&Value>,
    ) -> EngineResult<()> {
        self.check_style("set_layout_property")?;
        set_or_clear(&mut self.layer_mut(id)?.layout, key, value);
        self.record(EngineCall::SetLayoutProperty {
            id: id.to_string(),
            key: key.to_string(),
        });
        Ok(())
    }

    fn set_paint_property(
        &mut self,
        id: &str,
        key: &str,
        value: Option<&Value>,
    ) -> EngineResult<()> {
        self.check_style("set_paint_property")?;
        set_or_clear(&mut self.layer_mut(id)?.paint, key, value);
        self.record(EngineCall::SetPaintProperty {
            id: id.to_string(),
            key: key.to_string(),
        });
        Ok(())
    }

    fn set_layer_zoom_range(&mut self, id: &str, minzoom: f64, maxzoom: f64) -> EngineResult<()> {
        self.check_style("set_layer_zoom_range")?;
        if minzoom > maxzoom {
            return Err(EngineError::Rejected(format!(
                "minzoom {minzoom} exceeds maxzoom {maxzoom}"
            )));
        }
        let layer = self.layer_mut(id)?;
        layer.minzoom = Some(minzoom);
        layer.maxzoom = Some(maxzoom);
        self.record(EngineCall::SetLayerZoomRange {
            id: id.to_string(),
            min: minzoom,
            max: maxzoom,
        });
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: &Value) -> EngineResult<()> {
        self.check_style("set_source_data")?;
        let spec = self.source_of_type(id, "set_source_data", &[SourceType::Geojson])?;
        spec.options.insert("data".to_string(), data.clone());
        self.record(EngineCall::SetSourceData { id: id.to_string() });
        Ok(())
    }

    fn set_source_coordinates(&mut self, id: &str, coordinates: &Value) -> EngineResult<()> {
        self.check_style("set_source_coordinates")?;
        let spec = self.source_of_type(
            id,
            "set_source_coordinates",
            &[SourceType::Image, SourceType::Video, SourceType::Canvas],
        )?;
        spec.options
            .insert("coordinates".to_string(), coordinates.clone());
        self.record(EngineCall::SetSourceCoordinates { id: id.to_string() });
        Ok(())
    }

    fn update_image(
        &mut self,
        id: &str,
        url: Option<&Value>,
        coordinates: Option<&Value>,
    ) -> EngineResult<()> {
        self.check_style("update_image")?;
        let spec = self.source_of_type(id, "update_image", &[SourceType::Image])?;
        if let Some(url) = url {
            spec.options.insert("url".to_string(), url.clone());
        }
        if let Some(coordinates) = coordinates {
            spec.options
                .insert("coordinates".to_string(), coordinates.clone());
        }
        self.record(EngineCall::UpdateImage { id: id.to_string() });
        Ok(())
    }

    fn set_source_url(&mut self, id: &str, url: &str) -> EngineResult<()> {
        self.check_style("set_source_url")?;
        let spec = self.tiled_source(id, "set_source_url")?;
        spec.options
            .insert("url".to_string(), Value::String(url.to_string()));
        self.record(EngineCall::SetSourceUrl { id: id.to_string() });
        Ok(())
    }

    fn set_source_tiles(&mut self, id: &str, tiles: &[String]) -> EngineResult<()> {
        self.check_style("set_source_tiles")?;
        let spec = self.tiled_source(id, "set_source_tiles")?;
        spec.options.insert(
            "tiles".to_string(),
            Value::Array(tiles.iter().cloned().map(Value::String).collect()),
        );
        self.record(EngineCall::SetSourceTiles { id: id.to_string() });
        Ok(())
    }
}

fn layer_info(spec: &LayerSpec) -> LayerInfo {
    LayerInfo {
        id: spec.id.clone(),
        layer_type: spec.layer_type.clone(),
        source: spec.source.clone(),
    }
}

impl MarkerEngine for MemoryEngine {
    fn add_marker(&mut self, id: &str, props: &MarkerProps) -> EngineResult<()> {
        self.injected("add_marker")?;
        if self.markers.contains_key(id) {
            return Err(EngineError::Rejected(format!("marker {id} already added")));
        }
        let state = MarkerState {
            lng_lat: props.lng_lat(),
            offset: props.offset.unwrap_or_default(),
            anchor: props.anchor.unwrap_or(Anchor::Center),
            draggable: props.draggable.unwrap_or(false),
            rotation: props.rotation.unwrap_or(0.0),
            rotation_alignment: props.rotation_alignment.unwrap_or_default(),
            pitch_alignment: props.pitch_alignment.unwrap_or_default(),
            popup: props.popup.clone(),
        };
        self.markers.insert(id.to_string(), state);
        self.record(EngineCall::AddMarker { id: id.to_string() });
        Ok(())
    }

    fn remove_marker(&mut self, id: &str) -> EngineResult<()> {
        self.injected("remove_marker")?;
        self.markers
            .remove(id)
            .ok_or_else(|| EngineError::MarkerNotFound(id.to_string()))?;
        self.record(EngineCall::RemoveMarker { id: id.to_string() });
        Ok(())
    }

    fn marker(&self, id: &str) -> Option<MarkerState> {
        self.markers.get(id).cloned()
    }

    fn set_marker_lng_lat(&mut self, id: &str, lng_lat: LngLat) -> EngineResult<()> {
        self.marker_mut("set_marker_lng_lat", id)?.lng_lat = lng_lat;
        self.record(EngineCall::SetMarkerLngLat { id: id.to_string() });
        Ok(())
    }

    fn set_marker_offset(&mut self, id: &str, offset: Point) -> EngineResult<()> {
        self.marker_mut("set_marker_offset", id)?.offset = offset;
        self.record(EngineCall::SetMarkerOffset { id: id.to_string() });
        Ok(())
    }

    fn set_marker_draggable(&mut self, id: &str, draggable: bool) -> EngineResult<()> {
        self.marker_mut("set_marker_draggable", id)?.draggable = draggable;
        self.record(EngineCall::SetMarkerDraggable {
            id: id.to_string(),
            draggable,
        });
        Ok(())
    }

    fn set_marker_rotation(&mut self, id: &str, rotation: f64) -> EngineResult<()> {
        self.marker_mut("set_marker_rotation", id)?.rotation = rotation;
        self.record(EngineCall::SetMarkerRotation { id: id.to_string() });
        Ok(())
    }

    fn set_marker_rotation_alignment(
        &mut self,
        id: &str,
        alignment: Alignment,
    ) -> EngineResult<()> {
        self.marker_mut("set_marker_rotation_alignment", id)?
            .rotation_alignment = alignment;
        self.record(EngineCall::SetMarkerRotationAlignment { id: id.to_string() });
        Ok(())
    }

    fn set_marker_pitch_alignment(&mut self, id: &str, alignment: Alignment) -> EngineResult<()> {
        self.marker_mut("set_marker_pitch_alignment", id)?
            .pitch_alignment = alignment;
        self.record(EngineCall::SetMarkerPitchAlignment { id: id.to_string() });
        Ok(())
    }

    fn set_marker_popup(&mut self, id: &str, popup: Option<&str>) -> EngineResult<()> {
        self.marker_mut("set_marker_popup", id)?.popup = popup.map(str::to_string);
        self.record(EngineCall::SetMarkerPopup {
            id: id.to_string(),
            popup: popup.map(str::to_string),
        });
        Ok(())
    }
}

impl PopupEngine for MemoryEngine {
    fn add_popup(&mut self, id: &str, props: &PopupProps) -> EngineResult<()> {
        self.injected("add_popup")?;
        if self.popups.contains_key(id) {
            return Err(EngineError::Rejected(format!("popup {id} already open")));
        }
        let state = PopupState {
            lng_lat: props.lng_lat(),
            anchor: props.anchor,
            offset: props.offset.clone(),
            max_width: props
                .max_width
                .clone()
                .unwrap_or_else(|| DEFAULT_POPUP_MAX_WIDTH.to_string()),
            class_list: class_list(props.class_name.as_deref()),
        };
        self.popups.insert(id.to_string(), state);
        self.record(EngineCall::AddPopup { id: id.to_string() });
        Ok(())
    }

    fn remove_popup(&mut self, id: &str) -> EngineResult<()> {
        self.injected("remove_popup")?;
        self.popups
            .remove(id)
            .ok_or_else(|| EngineError::PopupNotFound(id.to_string()))?;
        self.record(EngineCall::RemovePopup { id: id.to_string() });
        Ok(())
    }

    fn popup(&self, id: &str) -> Option<PopupState> {
        self.popups.get(id).cloned()
    }

    fn set_popup_lng_lat(&mut self, id: &str, lng_lat: LngLat) -> EngineResult<()> {
        self.popup_mut("set_popup_lng_lat", id)?.lng_lat = lng_lat;
        self.record(EngineCall::SetPopupLngLat { id: id.to_string() });
        Ok(())
    }

    fn set_popup_offset(&mut self, id: &str, offset: &PopupOffset) -> EngineResult<()> {
        self.popup_mut("set_popup_offset", id)?.offset = Some(offset.clone());
        self.record(EngineCall::SetPopupOffset { id: id.to_string() });
        Ok(())
    }

    fn set_popup_anchor(&mut self, id: &str, anchor: Option<Anchor>) -> EngineResult<()> {
        self.popup_mut("set_popup_anchor", id)?.anchor = anchor;
        self.record(EngineCall::SetPopupAnchor { id: id.to_string() });
        Ok(())
    }

    fn set_popup_max_width(&mut self, id: &str, max_width: &str) -> EngineResult<()> {
        self.popup_mut("set_popup_max_width", id)?.max_width = max_width.to_string();
        self.record(EngineCall::SetPopupMaxWidth { id: id.to_string() });
        Ok(())
    }

    fn add_popup_class_name(&mut self, id: &str, class_name: &str) -> EngineResult<()> {
        self.popup_mut("add_popup_class_name", id)?
            .class_list
            .insert(class_name.to_string());
        self.record(EngineCall::AddPopupClassName {
            id: id.to_string(),
            class: class_name.to_string(),
        });
        Ok(())
    }

    fn remove_popup_class_name(&mut self, id: &str, class_name: &str) -> EngineResult<()> {
        self.popup_mut("remove_popup_class_name", id)?
            .class_list
            .remove(class_name);
        self.record(EngineCall::RemovePopupClassName {
            id: id.to_string(),
            class: class_name.to_string(),
        });
        Ok(())
    }
}

impl ControlEngine for MemoryEngine {
    fn has_control(&self, id: &str) -> bool {
        self.controls.contains_key(id)
    }

    fn add_control(
        &mut self,
        id: &str,
        spec: &ControlSpec,
        position: Option<ControlPosition>,
    ) -> EngineResult<()> {
        self.injected("add_control")?;
        if self.controls.contains_key(id) {
            return Err(EngineError::DuplicateControl(id.to_string()));
        }
        self.controls.insert(
            id.to_string(),
            ControlEntry {
                spec: spec.clone(),
                position,
            },
        );
        self.record(EngineCall::AddControl { id: id.to_string() });
        Ok(())
    }

    fn remove_control(&mut self, id: &str) -> EngineResult<()> {
        self.injected("remove_control")?;
        self.controls
            .remove(id)
            .ok_or_else(|| EngineError::ControlNotFound(id.to_string()))?;
        self.record(EngineCall::RemoveControl { id: id.to_string() });
        Ok(())
    }
}

impl CameraEngine for MemoryEngine {
    fn center(&self) -> LngLat {
        self.transform.center
    }

    fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    fn bearing(&self) -> f64 {
        self.transform.bearing
    }

    fn pitch(&self) -> f64 {
        self.transform.pitch
    }

    fn padding(&self) -> Padding {
        self.transform.padding
    }

    fn bounds(&self) -> LngLatBounds {
        self.transform.bounds()
    }

    fn project(&self, lng_lat: LngLat) -> Point {
        self.transform.location_point(lng_lat)
    }

    fn unproject(&self, point: Point) -> LngLat {
        self.transform.point_location(point)
    }
}
