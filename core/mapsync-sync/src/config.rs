use mapsync_types::DEFAULT_PREFIX;
use serde::{Deserialize, Serialize};

/// Configuration for a [`MapSync`](crate::MapSync).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSyncConfig {
    /// Prefix of allocated ids (`{prefix}-{kind}-{n}`).
    pub id_prefix: String,
    /// Readiness-triggered passes a layer may wait on a missing source
    /// before one warning is reported. 0 disables the warning.
    pub deferral_warning_passes: u32,
    /// Re-evaluate style entities on every style-data signal received while
    /// ready, not only on the transition to ready.
    pub reconcile_on_every_style_event: bool,
}

impl Default for MapSyncConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_PREFIX.to_string(),
            deferral_warning_passes: 8,
            reconcile_on_every_style_event: true,
        }
    }
}
