use thiserror::Error;

/// Result type for diff operations.
pub type DiffResult<T> = Result<T, DiffError>;

/// Reasons a declaration change cannot be applied in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The entity id changed; the entity must be recreated instead.
    #[error("{kind} id changed from {previous:?} to {next:?}")]
    IdChanged {
        kind: &'static str,
        previous: Option<String>,
        next: Option<String>,
    },

    /// The source or layer type changed; the entity must be recreated instead.
    #[error("{kind} {id} type changed from {previous} to {next}")]
    TypeChanged {
        kind: &'static str,
        id: String,
        previous: String,
        next: String,
    },

    /// The changed keys have no incremental update.
    #[error("unable to update {kind} {id}: changed keys {}", keys.join(", "))]
    Unresolvable {
        kind: &'static str,
        id: String,
        keys: Vec<String>,
    },
}
