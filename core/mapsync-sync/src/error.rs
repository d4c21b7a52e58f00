//! Error types for the reconciliation layer.

use mapsync_types::EntityKind;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while reconciling entities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// Engine call failed.
    #[error("engine error: {0}")]
    Engine(#[from] mapsync_engine::EngineError),

    /// Declaration change cannot be applied in place.
    #[error("diff error: {0}")]
    Diff(#[from] mapsync_diff::DiffError),

    /// No entity is mounted under this handle.
    #[error("unknown entity handle: {0}")]
    UnknownEntity(u64),

    /// A mounted entity was re-declared as another kind.
    #[error("{id}: kind changed from {previous} to {next}")]
    KindChanged {
        id: String,
        previous: EntityKind,
        next: EntityKind,
    },

    /// A mounted entity was re-declared under another id.
    #[error("{kind} id changed from {previous:?} to {next:?}")]
    IdChanged {
        kind: EntityKind,
        previous: Option<String>,
        next: Option<String>,
    },

    /// Child layers can only be mounted inside a source.
    #[error("entity {0} is not a source")]
    NotASource(String),

    /// Map id reserved for the map currently in scope.
    #[error("'{0}' cannot be used as map id")]
    ReservedMapId(String),

    /// Another map is registered under this id.
    #[error("multiple maps with the same id: {0}")]
    DuplicateMap(String),
}

impl SyncError {
    /// Returns true for identity or kind changes on a mounted entity.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            SyncError::KindChanged { .. }
                | SyncError::IdChanged { .. }
                | SyncError::Diff(mapsync_diff::DiffError::IdChanged { .. })
                | SyncError::Diff(mapsync_diff::DiffError::TypeChanged { .. })
        )
    }
}
