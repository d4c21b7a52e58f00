//! Structural diff engine.
//!
//! Given the previous and next declaration of one entity, compute the
//! ordered list of imperative operations that brings a live entity from the
//! first to the second. Diffing is per kind: [`diff_source`] and
//! [`diff_layer`]. Markers and popups are not diffed here; they are compared
//! against live engine state by their synchronizers.

mod error;
mod layer;
mod source;

pub use error::{DiffError, DiffResult};
pub use layer::{LayerOp, diff_layer};
pub use source::{SourceOp, changed_keys, diff_source};
