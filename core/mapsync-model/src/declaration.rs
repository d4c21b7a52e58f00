use crate::{ControlProps, LayerProps, MarkerProps, PopupProps, SourceProps};
use mapsync_types::EntityKind;
use serde::{Deserialize, Serialize};

/// One declared entity, tagged by kind.
///
/// Serialized with a `"kind"` tag next to the entity's own keys, e.g.
/// `{"kind": "source", "id": "S", "type": "geojson", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Declaration {
    Source(SourceProps),
    Layer(LayerProps),
    Marker(MarkerProps),
    Popup(PopupProps),
    Control(ControlProps),
}

impl Declaration {
    pub fn kind(&self) -> EntityKind {
        match self {
            Declaration::Source(_) => EntityKind::Source,
            Declaration::Layer(_) => EntityKind::Layer,
            Declaration::Marker(_) => EntityKind::Marker,
            Declaration::Popup(_) => EntityKind::Popup,
            Declaration::Control(_) => EntityKind::Control,
        }
    }

    /// The caller-supplied id, if any.
    pub fn explicit_id(&self) -> Option<&str> {
        match self {
            Declaration::Source(p) => p.id.as_deref(),
            Declaration::Layer(p) => p.id.as_deref(),
            Declaration::Marker(p) => p.id.as_deref(),
            Declaration::Popup(p) => p.id.as_deref(),
            Declaration::Control(p) => p.id.as_deref(),
        }
    }
}

impl From<SourceProps> for Declaration {
    fn from(value: SourceProps) -> Self {
        Declaration::Source(value)
    }
}

impl From<LayerProps> for Declaration {
    fn from(value: LayerProps) -> Self {
        Declaration::Layer(value)
    }
}

impl From<MarkerProps> for Declaration {
    fn from(value: MarkerProps) -> Self {
        Declaration::Marker(value)
    }
}

impl From<PopupProps> for Declaration {
    fn from(value: PopupProps) -> Self {
        Declaration::Popup(value)
    }
}

impl From<ControlProps> for Declaration {
    fn from(value: ControlProps) -> Self {
        Declaration::Control(value)
    }
}
