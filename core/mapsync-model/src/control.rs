//! Control declarations.

use crate::PropertyMap;
use mapsync_types::ControlPosition;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which control to build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ControlType {
    Navigation,
    Scale,
    Fullscreen,
    Geolocate,
    Attribution,
    /// A caller-provided control, named by the caller.
    Custom(String),
}

impl ControlType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ControlType::Navigation => "navigation",
            ControlType::Scale => "scale",
            ControlType::Fullscreen => "fullscreen",
            ControlType::Geolocate => "geolocate",
            ControlType::Attribution => "attribution",
            ControlType::Custom(name) => name,
        }
    }
}

impl From<String> for ControlType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "navigation" => ControlType::Navigation,
            "scale" => ControlType::Scale,
            "fullscreen" => ControlType::Fullscreen,
            "geolocate" => ControlType::Geolocate,
            "attribution" => ControlType::Attribution,
            _ => ControlType::Custom(value),
        }
    }
}

impl From<ControlType> for String {
    fn from(value: ControlType) -> Self {
        match value {
            ControlType::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Declared properties of a control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub control_type: ControlType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ControlPosition>,
    /// Control constructor options (`showCompass`, `unit`, ...).
    #[serde(flatten)]
    pub options: PropertyMap,
}

impl ControlProps {
    pub fn new(control_type: ControlType) -> Self {
        Self {
            id: None,
            control_type,
            position: None,
            options: PropertyMap::new(),
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn to_spec(&self) -> ControlSpec {
        ControlSpec {
            control_type: self.control_type.clone(),
            options: self.options.clone(),
        }
    }
}

/// Control descriptor handed to the engine's `add_control`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSpec {
    #[serde(rename = "type")]
    pub control_type: ControlType,
    #[serde(flatten)]
    pub options: PropertyMap,
}
