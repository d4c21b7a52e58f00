//! Entity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of a declared map entity.
///
/// A kind is fixed for the lifetime of an entity: changing it requires
/// destroying the entity and declaring a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Source,
    Layer,
    Marker,
    Popup,
    Control,
}

impl EntityKind {
    /// All kinds, in the order a full reconciliation pass visits them.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Source,
        EntityKind::Layer,
        EntityKind::Marker,
        EntityKind::Popup,
        EntityKind::Control,
    ];

    /// Returns the lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Source => "source",
            EntityKind::Layer => "layer",
            EntityKind::Marker => "marker",
            EntityKind::Popup => "popup",
            EntityKind::Control => "control",
        }
    }

    /// Returns true for kinds that live inside the engine's style document
    /// and are therefore discarded by a style reload.
    #[must_use]
    pub const fn is_style_bound(&self) -> bool {
        matches!(self, EntityKind::Source | EntityKind::Layer)
    }

    pub(crate) const fn index(&self) -> usize {
        match self {
            EntityKind::Source => 0,
            EntityKind::Layer => 1,
            EntityKind::Marker => 2,
            EntityKind::Popup => 3,
            EntityKind::Control => 4,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(EntityKind::Source),
            "layer" => Ok(EntityKind::Layer),
            "marker" => Ok(EntityKind::Marker),
            "popup" => Ok(EntityKind::Popup),
            "control" => Ok(EntityKind::Control),
            other => Err(crate::Error::UnknownKind(other.to_string())),
        }
    }
}
