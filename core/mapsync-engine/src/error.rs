//! Error types for engine calls.

use thiserror::Error;

/// Result type for engine calls.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors an engine mutation call can fail with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The style is (re)loading; style mutations are illegal.
    #[error("style is not done loading")]
    StyleNotLoaded,

    /// Source not found.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// Layer not found.
    #[error("layer not found: {0}")]
    LayerNotFound(String),

    /// A source with this id already exists.
    #[error("there is already a source with id {0}")]
    DuplicateSource(String),

    /// A layer with this id already exists.
    #[error("layer with id {0} already exists on this map")]
    DuplicateLayer(String),

    /// A layer still references the source.
    #[error("source {source_id} cannot be removed while layer {layer_id} is using it")]
    SourceInUse { source_id: String, layer_id: String },

    /// Marker not found.
    #[error("marker not found: {0}")]
    MarkerNotFound(String),

    /// Popup not found.
    #[error("popup not found: {0}")]
    PopupNotFound(String),

    /// A control with this id is already on the map.
    #[error("control already added: {0}")]
    DuplicateControl(String),

    /// Control not found.
    #[error("control not found: {0}")]
    ControlNotFound(String),

    /// The target does not support the operation (e.g. `set_data` on a
    /// raster source).
    #[error("unsupported operation {operation} on {target}")]
    UnsupportedOperation { operation: String, target: String },

    /// The engine refused the call for another reason.
    #[error("rejected: {0}")]
    Rejected(String),
}
