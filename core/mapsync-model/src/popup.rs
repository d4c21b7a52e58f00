//! Popup declarations.

use mapsync_types::{Anchor, LngLat, Point};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Max width applied when a popup declares none.
pub const DEFAULT_POPUP_MAX_WIDTH: &str = "240px";

fn yes() -> bool {
    true
}

/// Pixel offset of a popup from its coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PopupOffset {
    /// Distance from the coordinate in the direction of the anchor.
    Uniform(f64),
    /// Constant offset.
    Point(Point),
    /// Offset per anchor position.
    PerAnchor(BTreeMap<Anchor, Point>),
}

/// Declared properties of a popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    /// Dynamic placement (preferring `bottom`) when absent.
    #[serde(default)]
    pub anchor: Option<Anchor>,
    #[serde(default = "yes")]
    pub close_button: bool,
    #[serde(default = "yes")]
    pub close_on_click: bool,
    #[serde(default)]
    pub close_on_move: bool,
    #[serde(default = "yes")]
    pub focus_after_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<PopupOffset>,
    /// Space-separated CSS class names added to the popup container.
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
}

impl PopupProps {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            id: None,
            longitude,
            latitude,
            anchor: None,
            close_button: true,
            close_on_click: true,
            close_on_move: false,
            focus_after_open: true,
            offset: None,
            class_name: None,
            max_width: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn lng_lat(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }
}

/// Splits a space-separated class string into a set.
pub fn class_list(class_name: Option<&str>) -> BTreeSet<String> {
    class_name
        .map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
