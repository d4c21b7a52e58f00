//! Core type definitions for mapsync.
//!
//! This crate defines the small, engine-agnostic types used throughout the
//! reconciliation layer:
//! - [`EntityKind`]: the five kinds of declared map entities
//! - [`IdAllocator`]: stable fallback identifiers for unnamed entities
//! - Geometry values shared by markers, popups and the camera
//!   ([`LngLat`], [`Point`], [`Padding`], [`LngLatBounds`])
//! - Overlay placement enums ([`Anchor`], [`Alignment`], [`ControlPosition`])
//!
//! Style documents themselves (layer paint values, filters, GeoJSON) are
//! opaque JSON and are never modelled here.

mod geo;
mod ids;
mod kind;

pub use geo::{Alignment, Anchor, ControlPosition, LngLat, LngLatBounds, Padding, Point};
pub use ids::{DEFAULT_PREFIX, IdAllocator};
pub use kind::EntityKind;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing type values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    #[error("unknown anchor: {0}")]
    UnknownAnchor(String),

    #[error("unknown alignment: {0}")]
    UnknownAlignment(String),

    #[error("unknown control position: {0}")]
    UnknownPosition(String),
}
