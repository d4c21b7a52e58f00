//! Style document preparation.

use serde_json::{Map, Value};

/// Layer keys inherited from a referenced layer.
const REF_PROPS: [&str; 7] = [
    "type",
    "source",
    "source-layer",
    "minzoom",
    "maxzoom",
    "filter",
    "layout",
];

/// Prepares a style document for the engine's own style diffing.
///
/// Legacy styles break that diffing in two ways: an `interactive` key on a
/// layer, and layers declared with `ref` to another layer. The first is
/// stripped, the second expanded by copying [`REF_PROPS`] from the
/// referenced layer. The input is never modified; anything that is not an
/// object with a `layers` array is returned as is.
pub fn normalize_style(style: &Value) -> Value {
    let Some(layers) = style.get("layers").and_then(Value::as_array) else {
        return style.clone();
    };

    let index: Map<String, Value> = layers
        .iter()
        .filter_map(|layer| {
            let id = layer.get("id")?.as_str()?;
            Some((id.to_string(), layer.clone()))
        })
        .collect();

    let normalized: Vec<Value> = layers
        .iter()
        .map(|layer| {
            let Some(object) = layer.as_object() else {
                return layer.clone();
            };
            let mut object = object.clone();
            object.remove("interactive");

            let referenced = object
                .get("ref")
                .and_then(Value::as_str)
                .and_then(|id| index.get(id))
                .and_then(Value::as_object)
                .cloned();
            if let Some(referenced) = referenced {
                object.remove("ref");
                for key in REF_PROPS {
                    if let Some(value) = referenced.get(key) {
                        object.insert(key.to_string(), value.clone());
                    }
                }
            }
            Value::Object(object)
        })
        .collect();

    let mut result = style.clone();
    if let Some(object) = result.as_object_mut() {
        object.insert("layers".to_string(), Value::Array(normalized));
    }
    result
}
