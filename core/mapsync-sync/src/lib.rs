//! Declarative-to-imperative reconciliation for map engines.
//!
//! Callers describe a map's sources, layers, markers, popups and controls
//! as declarations. [`MapSync`] keeps a live engine in line with them,
//! issuing the fewest engine calls it can.
//!
//! # Architecture
//!
//! - **Readiness gate** ([`ReadinessGate`]): tracks whether the engine's
//!   style is loaded. Style calls are never made while it is not; every
//!   transition back to ready re-evaluates sources and layers from scratch.
//! - **Synchronizers**: one per entity kind, owning that entity's
//!   create/update/destroy calls. Sources and layers are diffed against
//!   their previous declaration; markers and popups are compared against
//!   live engine state.
//! - **Diagnostics** ([`DiagnosticSink`]): unresolvable diffs, identity
//!   violations and engine failures are reported, never returned to the
//!   owning tree.
//! - **Facade** ([`MapRef`]): a read-only view for outside callers.
//!
//! # Example
//!
//! ```
//! use mapsync_engine::MemoryEngine;
//! use mapsync_model::{LayerProps, SourceProps};
//! use mapsync_sync::{MapSync, MapSyncConfig};
//! use serde_json::json;
//!
//! let mut map = MapSync::new(MemoryEngine::new(), MapSyncConfig::default());
//! let points = SourceProps::geojson(json!({"type": "Point", "coordinates": [0, 0]})).with_id("S");
//! let (source, _) = map.mount(points);
//! map.mount(LayerProps::new("circle").with_id("L").with_source("S"));
//! assert!(map.engine().calls().is_empty());
//!
//! map.engine_mut().finish_style_load();
//! map.on_style_data();
//! assert_eq!(map.engine().layer_ids(), vec!["L"]);
//! # let _ = source;
//! ```

mod config;
mod diagnostics;
mod error;
mod facade;
mod gate;
mod map;
mod outcome;
mod registry;
mod sync;

pub use config::MapSyncConfig;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
pub use error::{SyncError, SyncResult};
pub use facade::{EXCLUDED_METHODS, MapRef};
pub use gate::{ReadinessGate, Subscription};
pub use map::{EntityHandle, MapSync};
pub use outcome::ReconcileOutcome;
pub use registry::{CURRENT_MAP_ID, DEFAULT_MAP_ID, MapRegistry};
