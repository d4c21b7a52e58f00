//! Marker declarations.

use mapsync_types::{Alignment, Anchor, LngLat, Point};
use serde::{Deserialize, Serialize};

fn default_draggable() -> Option<bool> {
    Some(false)
}

fn default_rotation() -> Option<f64> {
    Some(0.0)
}

fn default_alignment() -> Option<Alignment> {
    Some(Alignment::Auto)
}

/// Declared properties of a marker.
///
/// Optional fields left as `None` are never pushed to the live marker, so
/// whatever the engine (or the user) set stays in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    /// Pixels the pointer may move during a click before it counts as a drag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_draggable")]
    pub draggable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Point>,
    #[serde(default = "default_alignment")]
    pub pitch_alignment: Option<Alignment>,
    /// Clockwise rotation in degrees.
    #[serde(default = "default_rotation")]
    pub rotation: Option<f64>,
    #[serde(default = "default_alignment")]
    pub rotation_alignment: Option<Alignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Id of the popup bound to this marker.
    #[serde(default)]
    pub popup: Option<String>,
}

impl MarkerProps {
    /// Creates a marker at the given coordinate with default options.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            id: None,
            longitude,
            latitude,
            anchor: None,
            click_tolerance: None,
            color: None,
            draggable: default_draggable(),
            offset: None,
            pitch_alignment: default_alignment(),
            rotation: default_rotation(),
            rotation_alignment: default_alignment(),
            scale: None,
            popup: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_popup(mut self, popup: impl Into<String>) -> Self {
        self.popup = Some(popup.into());
        self
    }

    pub fn lng_lat(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }
}
