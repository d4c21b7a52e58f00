use mapsync_model::normalize_style;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn non_object_styles_pass_through() {
    assert_eq!(
        normalize_style(&json!("mapbox://styles/mapbox/streets-v11")),
        json!("mapbox://styles/mapbox/streets-v11")
    );
    let no_layers = json!({"version": 8, "sources": {}});
    assert_eq!(normalize_style(&no_layers), no_layers);
}

#[test]
fn interactive_key_is_stripped() {
    let style = json!({
        "version": 8,
        "layers": [{"id": "a", "type": "fill", "interactive": true}]
    });
    assert_eq!(
        normalize_style(&style),
        json!({"version": 8, "layers": [{"id": "a", "type": "fill"}]})
    );
}

#[test]
fn ref_layers_are_expanded() {
    let style = json!({
        "version": 8,
        "layers": [
            {"id": "base", "type": "line", "source": "s", "source-layer": "road",
             "layout": {"line-cap": "round"}, "paint": {"line-width": 1}},
            {"id": "casing", "ref": "base", "paint": {"line-width": 3}}
        ]
    });
    let normalized = normalize_style(&style);
    assert_eq!(
        normalized["layers"][1],
        json!({
            "id": "casing",
            "type": "line",
            "source": "s",
            "source-layer": "road",
            "layout": {"line-cap": "round"},
            "paint": {"line-width": 3}
        })
    );
}

#[test]
fn input_is_not_mutated() {
    let style = json!({"layers": [{"id": "a", "interactive": false}]});
    let before = style.clone();
    let _ = normalize_style(&style);
    assert_eq!(style, before);
}

#[test]
fn unknown_ref_is_left_alone() {
    let style = json!({"layers": [{"id": "a", "ref": "missing"}]});
    assert_eq!(normalize_style(&style), style);
}
