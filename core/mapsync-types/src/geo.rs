//! Geometry and placement values shared by overlays and the camera.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A geographic coordinate. Serialized as `[lng, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    #[must_use]
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        [value.lng, value.lat]
    }
}

/// A screen-space point in pixels. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(value: Point) -> Self {
        [value.x, value.y]
    }
}

/// Viewport padding in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// A geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLatBounds {
    /// South-west corner.
    pub sw: LngLat,
    /// North-east corner.
    pub ne: LngLat,
}

impl LngLatBounds {
    /// Returns true if `point` lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: LngLat) -> bool {
        point.lng >= self.sw.lng
            && point.lng <= self.ne.lng
            && point.lat >= self.sw.lat
            && point.lat <= self.ne.lat
    }
}

/// The part of an overlay positioned closest to its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Anchor::Center => "center",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "center" => Ok(Anchor::Center),
            "top" => Ok(Anchor::Top),
            "bottom" => Ok(Anchor::Bottom),
            "left" => Ok(Anchor::Left),
            "right" => Ok(Anchor::Right),
            "top-left" => Ok(Anchor::TopLeft),
            "top-right" => Ok(Anchor::TopRight),
            "bottom-left" => Ok(Anchor::BottomLeft),
            "bottom-right" => Ok(Anchor::BottomRight),
            other => Err(crate::Error::UnknownAnchor(other.to_string())),
        }
    }
}

/// Plane an overlay is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Map,
    Viewport,
    #[default]
    Auto,
}

impl FromStr for Alignment {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "map" => Ok(Alignment::Map),
            "viewport" => Ok(Alignment::Viewport),
            "auto" => Ok(Alignment::Auto),
            other => Err(crate::Error::UnknownAlignment(other.to_string())),
        }
    }
}

/// Corner of the map container a control is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl FromStr for ControlPosition {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(ControlPosition::TopLeft),
            "top-right" => Ok(ControlPosition::TopRight),
            "bottom-left" => Ok(ControlPosition::BottomLeft),
            "bottom-right" => Ok(ControlPosition::BottomRight),
            other => Err(crate::Error::UnknownPosition(other.to_string())),
        }
    }
}
