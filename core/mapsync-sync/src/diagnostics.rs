//! Diagnostic channel.
//!
//! Reconciliation never returns errors to the owning tree. Unresolvable
//! diffs, identity violations and failed engine calls are turned into
//! [`Diagnostic`]s and handed to a [`DiagnosticSink`].

use crate::SyncError;
use mapsync_diff::DiffError;
use mapsync_types::EntityKind;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Changed keys with no incremental update; the change was dropped.
    UnresolvableDiff,
    /// Id or kind of a mounted entity changed; the update was skipped.
    InvariantViolation,
    /// An engine call failed.
    EngineFailure,
    /// A layer has waited on its source for many passes.
    LongDeferral,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnresolvableDiff => "unresolvable_diff",
            DiagnosticKind::InvariantViolation => "invariant_violation",
            DiagnosticKind::EngineFailure => "engine_failure",
            DiagnosticKind::LongDeferral => "long_deferral",
        }
    }
}

/// A human-readable warning about one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub entity: EntityKind,
    pub id: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        entity: EntityKind,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity,
            id: id.into(),
            message: message.into(),
        }
    }

    /// Classifies a synchronizer error.
    pub fn from_error(entity: EntityKind, id: &str, error: &SyncError) -> Self {
        let kind = match error {
            SyncError::Diff(DiffError::Unresolvable { .. }) => DiagnosticKind::UnresolvableDiff,
            e if e.is_invariant_violation() => DiagnosticKind::InvariantViolation,
            _ => DiagnosticKind::EngineFailure,
        };
        Self::new(kind, entity, id, error.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}: {}", self.kind.as_str(), self.entity, self.id, self.message)
    }
}

/// Receiver of diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Emits each diagnostic as a `tracing` warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        warn!(
            kind = diagnostic.kind.as_str(),
            entity = %diagnostic.entity,
            id = %diagnostic.id,
            "{}",
            diagnostic.message
        );
    }
}

/// Keeps diagnostics in memory.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to the map.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    inner: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.inner.borrow().clone()
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.inner.borrow_mut().push(diagnostic);
    }
}
