//! Web Mercator camera transform.

use mapsync_types::{LngLat, LngLatBounds, Padding, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Size in pixels of the world at zoom 0.
pub const TILE_SIZE: f64 = 512.0;

const MAX_LATITUDE: f64 = 85.051_129;

/// Camera state and the projections derived from it.
///
/// Pitch is carried for reporting only; projections treat the view as
/// top-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub center: LngLat,
    pub zoom: f64,
    /// Degrees clockwise from north.
    pub bearing: f64,
    pub pitch: f64,
    pub padding: Padding,
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            center: LngLat::new(0.0, 0.0),
            zoom: 0.0,
            bearing: 0.0,
            pitch: 0.0,
            padding: Padding::default(),
            width: TILE_SIZE,
            height: TILE_SIZE,
        }
    }
}

impl Transform {
    /// Creates a transform for a viewport of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }

    fn to_world(&self, lng_lat: LngLat) -> (f64, f64) {
        let size = self.world_size();
        let lat = lng_lat.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let x = (180.0 + lng_lat.lng) / 360.0 * size;
        let y = (180.0 - (180.0 / PI) * (PI / 4.0 + lat * PI / 360.0).tan().ln()) / 360.0 * size;
        (x, y)
    }

    fn from_world(&self, x: f64, y: f64) -> LngLat {
        let size = self.world_size();
        let lng = x / size * 360.0 - 180.0;
        let y2 = 180.0 - y / size * 360.0;
        let lat = 360.0 / PI * (y2 * PI / 180.0).exp().atan() - 90.0;
        LngLat::new(lng, lat)
    }

    /// Pixel position of the center, shifted by padding.
    fn center_point(&self) -> Point {
        Point::new(
            (self.width + self.padding.left - self.padding.right) / 2.0,
            (self.height + self.padding.top - self.padding.bottom) / 2.0,
        )
    }

    /// Screen position of a coordinate.
    #[must_use]
    pub fn location_point(&self, lng_lat: LngLat) -> Point {
        let (px, py) = self.to_world(lng_lat);
        let (cx, cy) = self.to_world(self.center);
        let (dx, dy) = rotate(px - cx, py - cy, -self.bearing.to_radians());
        let origin = self.center_point();
        Point::new(origin.x + dx, origin.y + dy)
    }

    /// Coordinate under a screen position.
    #[must_use]
    pub fn point_location(&self, point: Point) -> LngLat {
        let origin = self.center_point();
        let (dx, dy) = rotate(point.x - origin.x, point.y - origin.y, self.bearing.to_radians());
        let (cx, cy) = self.to_world(self.center);
        self.from_world(cx + dx, cy + dy)
    }

    /// Geographic box covering the whole viewport.
    #[must_use]
    pub fn bounds(&self) -> LngLatBounds {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
        .map(|p| self.point_location(p));

        let mut sw = corners[0];
        let mut ne = corners[0];
        for corner in &corners[1..] {
            sw.lng = sw.lng.min(corner.lng);
            sw.lat = sw.lat.min(corner.lat);
            ne.lng = ne.lng.max(corner.lng);
            ne.lat = ne.lat.max(corner.lat);
        }
        LngLatBounds { sw, ne }
    }
}

fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}
