//! Map-rendering engine contract for mapsync.
//!
//! The engine is an external, stateful library that owns the live style
//! document. This crate describes the subset of its imperative API the
//! reconciliation layer consumes, split by capability:
//!
//! - [`StyleEngine`]: sources, layers and the style-loaded query
//! - [`MarkerEngine`] / [`PopupEngine`]: DOM overlays
//! - [`ControlEngine`]: UI controls
//! - [`CameraEngine`]: read access to the engine's own camera
//! - [`MapEngine`]: all of the above
//!
//! [`MemoryEngine`] is a headless implementation that keeps state in
//! memory, enforces the engine's legality rules (no style calls while the
//! style is loading, a layer's source must exist, a source in use cannot be
//! removed) and records every successful mutation as an [`EngineCall`].

mod call;
mod engine;
mod error;
mod memory;
mod transform;

pub use call::EngineCall;
pub use engine::{
    CameraEngine, ControlEngine, LayerInfo, MapEngine, MarkerEngine, MarkerState, PopupEngine,
    PopupState, SourceInfo, StyleEngine,
};
pub use error::{EngineError, EngineResult};
pub use memory::{ControlEntry, MemoryEngine};
pub use transform::{TILE_SIZE, Transform};
