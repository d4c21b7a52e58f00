//! Fallback identifiers for entities the caller did not name.
//!
//! Ids are `"{prefix}-{kind}-{n}"` with one monotonic counter per kind,
//! starting at zero. Counters never go backwards, so an id is never handed
//! out twice by the same allocator, even after the entity that held it has
//! been destroyed.

use crate::EntityKind;

/// Default prefix for allocated ids.
pub const DEFAULT_PREFIX: &str = "mapsync";

/// Issues stable, unique fallback ids, scoped per [`EntityKind`].
///
/// One allocator is owned by each synchronized map and threaded through
/// its synchronizers; two synchronizers of the same map can therefore
/// never be assigned the same unnamed id.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: String,
    counters: [u64; 5],
}

impl IdAllocator {
    /// Creates an allocator using the default `"mapsync"` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    /// Creates an allocator with a custom prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counters: [0; 5],
        }
    }

    /// Returns the prefix used for allocated ids.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Allocates the next id for `kind`.
    pub fn allocate(&mut self, kind: EntityKind) -> String {
        let counter = &mut self.counters[kind.index()];
        let n = *counter;
        *counter += 1;
        format!("{}-{}-{}", self.prefix, kind.as_str(), n)
    }

    /// Returns `explicit` if present, otherwise allocates a fresh id.
    pub fn resolve(&mut self, kind: EntityKind, explicit: Option<&str>) -> String {
        match explicit {
            Some(id) => id.to_string(),
            None => self.allocate(kind),
        }
    }

    /// Number of ids allocated so far for `kind`.
    #[must_use]
    pub fn allocated(&self, kind: EntityKind) -> u64 {
        self.counters[kind.index()]
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
