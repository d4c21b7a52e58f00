//! Source declarations.

use crate::PropertyMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Discriminant of a source; decides which incremental updates are legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceType {
    Geojson,
    Image,
    Video,
    Canvas,
    Vector,
    Raster,
    RasterDem,
    /// Any source type this crate has no incremental rules for.
    Other(String),
}

impl SourceType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SourceType::Geojson => "geojson",
            SourceType::Image => "image",
            SourceType::Video => "video",
            SourceType::Canvas => "canvas",
            SourceType::Vector => "vector",
            SourceType::Raster => "raster",
            SourceType::RasterDem => "raster-dem",
            SourceType::Other(name) => name,
        }
    }
}

impl From<String> for SourceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "geojson" => SourceType::Geojson,
            "image" => SourceType::Image,
            "video" => SourceType::Video,
            "canvas" => SourceType::Canvas,
            "vector" => SourceType::Vector,
            "raster" => SourceType::Raster,
            "raster-dem" => SourceType::RasterDem,
            _ => SourceType::Other(value),
        }
    }
}

impl From<&str> for SourceType {
    fn from(value: &str) -> Self {
        SourceType::from(value.to_string())
    }
}

impl From<SourceType> for String {
    fn from(value: SourceType) -> Self {
        match value {
            SourceType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared properties of a data source.
///
/// Everything except `id` and `type` lives in `options` and is passed to the
/// engine untouched (`data`, `url`, `tiles`, `coordinates`, `cluster`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(flatten)]
    pub options: PropertyMap,
}

impl SourceProps {
    /// Creates an unnamed source of the given type with no options.
    pub fn new(source_type: impl Into<SourceType>) -> Self {
        Self {
            id: None,
            source_type: source_type.into(),
            options: PropertyMap::new(),
        }
    }

    /// Shorthand for a GeoJSON source holding `data`.
    pub fn geojson(data: Value) -> Self {
        Self::new(SourceType::Geojson).with_option("data", data)
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Returns a declared option by key.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Builds the engine descriptor (everything but the id).
    pub fn to_spec(&self) -> SourceSpec {
        SourceSpec {
            source_type: self.source_type.clone(),
            options: self.options.clone(),
        }
    }
}

/// Source descriptor handed to the engine's `add_source`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    #[serde(flatten)]
    pub options: PropertyMap,
}
