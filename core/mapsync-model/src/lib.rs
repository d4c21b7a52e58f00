//! Declared entity model for mapsync.
//!
//! Defines the property records a caller declares for each kind of map
//! entity, re-supplied on every evaluation of the owning tree:
//! - [`SourceProps`]: a data source, discriminated by [`SourceType`]
//! - [`LayerProps`]: a style layer referencing a source
//! - [`MarkerProps`] / [`PopupProps`]: DOM overlays anchored to a coordinate
//! - [`ControlProps`]: a UI control placed in a container corner
//! - [`Declaration`]: the tagged union of all of the above
//!
//! Style values (layout/paint properties, filters, GeoJSON data) stay
//! opaque `serde_json::Value`s; [`deep_equal`] compares them structurally.

mod control;
mod declaration;
mod equality;
mod layer;
mod marker;
mod popup;
mod source;
mod style;

pub use control::{ControlProps, ControlSpec, ControlType};
pub use declaration::Declaration;
pub use equality::{deep_equal, deep_equal_opt, points_equal};
pub use layer::{LayerProps, LayerSpec, CUSTOM_LAYER_TYPE};
pub use marker::MarkerProps;
pub use popup::{class_list, PopupOffset, PopupProps, DEFAULT_POPUP_MAX_WIDTH};
pub use source::{SourceProps, SourceSpec, SourceType};
pub use style::normalize_style;

/// JSON object used for free-form property maps.
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;
