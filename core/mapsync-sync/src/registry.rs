//! Registry of mounted maps, looked up by id.

use crate::{SyncError, SyncResult};
use std::collections::BTreeMap;
use tracing::debug;

/// Id a map registers under when it names none.
pub const DEFAULT_MAP_ID: &str = "default";

/// Reserved for the map currently in scope; never a registered id.
pub const CURRENT_MAP_ID: &str = "current";

/// Maps mounted in the same application.
#[derive(Debug)]
pub struct MapRegistry<M> {
    maps: BTreeMap<String, M>,
}

impl<M> Default for MapRegistry<M> {
    fn default() -> Self {
        Self {
            maps: BTreeMap::new(),
        }
    }
}

impl<M> MapRegistry<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `map` under `id` (or [`DEFAULT_MAP_ID`]).
    ///
    /// # Errors
    ///
    /// [`SyncError::ReservedMapId`] for `"current"`,
    /// [`SyncError::DuplicateMap`] if the id is taken.
    pub fn register(&mut self, id: Option<&str>, map: M) -> SyncResult<()> {
        let id = id.unwrap_or(DEFAULT_MAP_ID);
        if id == CURRENT_MAP_ID {
            return Err(SyncError::ReservedMapId(id.to_string()));
        }
        if self.maps.contains_key(id) {
            return Err(SyncError::DuplicateMap(id.to_string()));
        }
        debug!(map = id, "map registered");
        self.maps.insert(id.to_string(), map);
        Ok(())
    }

    /// Removes and returns the map under `id`; unknown ids are ignored.
    pub fn unregister(&mut self, id: Option<&str>) -> Option<M> {
        let id = id.unwrap_or(DEFAULT_MAP_ID);
        let map = self.maps.remove(id);
        if map.is_some() {
            debug!(map = id, "map unregistered");
        }
        map
    }

    pub fn get(&self, id: &str) -> Option<&M> {
        self.maps.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut M> {
        self.maps.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
