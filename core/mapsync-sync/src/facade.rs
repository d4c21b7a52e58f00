//! Reference facade.
//!
//! [`MapRef`] is what outside callers get instead of the engine. It
//! forwards inspection calls to the engine, answers camera reads from the
//! map's shadow transform, and has no structural mutation methods at all.

use mapsync_engine::{LayerInfo, MapEngine, MarkerState, PopupState, SourceInfo, Transform};
use mapsync_types::{LngLat, LngLatBounds, Padding, Point};

/// Engine methods that are deliberately absent from [`MapRef`]. Calling
/// them directly would bypass the synchronizers.
pub const EXCLUDED_METHODS: &[&str] = &[
    "set_max_bounds",
    "set_min_zoom",
    "set_max_zoom",
    "set_min_pitch",
    "set_max_pitch",
    "set_render_world_copies",
    "set_projection",
    "set_style",
    "add_source",
    "remove_source",
    "add_layer",
    "remove_layer",
    "set_layer_zoom_range",
    "set_filter",
    "set_paint_property",
    "set_layout_property",
    "set_light",
    "set_terrain",
    "set_fog",
    "remove",
];

/// Read-only view of a synchronized map.
#[derive(Debug)]
pub struct MapRef<'a, E> {
    engine: &'a E,
    transform: &'a Transform,
}

impl<E> Clone for MapRef<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for MapRef<'_, E> {}

impl<'a, E: MapEngine> MapRef<'a, E> {
    pub(crate) fn new(engine: &'a E, transform: &'a Transform) -> Self {
        Self { engine, transform }
    }

    /// The underlying engine, shared.
    pub fn get_map(&self) -> &'a E {
        self.engine
    }

    // Camera reads come from the shadow transform, which may be ahead of
    // the engine's own camera.

    pub fn center(&self) -> LngLat {
        self.transform.center
    }

    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    pub fn bearing(&self) -> f64 {
        self.transform.bearing
    }

    pub fn pitch(&self) -> f64 {
        self.transform.pitch
    }

    pub fn padding(&self) -> Padding {
        self.transform.padding
    }

    pub fn bounds(&self) -> LngLatBounds {
        self.transform.bounds()
    }

    pub fn project(&self, lng_lat: LngLat) -> Point {
        self.transform.location_point(lng_lat)
    }

    pub fn unproject(&self, point: Point) -> LngLat {
        self.transform.point_location(point)
    }

    // Forwarded inspection.

    pub fn is_style_loaded(&self) -> bool {
        self.engine.is_style_loaded()
    }

    pub fn get_source(&self, id: &str) -> Option<SourceInfo> {
        self.engine.get_source(id)
    }

    pub fn get_layer(&self, id: &str) -> Option<LayerInfo> {
        self.engine.get_layer(id)
    }

    pub fn style_layers(&self) -> Vec<LayerInfo> {
        self.engine.style_layers()
    }

    pub fn marker(&self, id: &str) -> Option<MarkerState> {
        self.engine.marker(id)
    }

    pub fn popup(&self, id: &str) -> Option<PopupState> {
        self.engine.popup(id)
    }

    pub fn has_control(&self, id: &str) -> bool {
        self.engine.has_control(id)
    }
}
