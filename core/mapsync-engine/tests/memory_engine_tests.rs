use mapsync_engine::{
    ControlEngine, EngineCall, EngineError, MarkerEngine, MemoryEngine, PopupEngine, StyleEngine,
};
use mapsync_model::{ControlProps, ControlType, LayerProps, MarkerProps, PopupProps, SourceProps};
use mapsync_types::{ControlPosition, LngLat};
use pretty_assertions::assert_eq;
use serde_json::json;

fn make_geojson() -> SourceProps {
    SourceProps::geojson(json!({"type": "Point", "coordinates": [0, 0]}))
}

fn make_layer(source: &str) -> LayerProps {
    LayerProps::new("circle").with_source(source)
}

fn make_engine_with_layers(ids: &[&str]) -> MemoryEngine {
    let mut engine = MemoryEngine::loaded();
    engine.add_source("s", &make_geojson().to_spec()).unwrap();
    for id in ids {
        engine
            .add_layer(&make_layer("s").to_spec(id), None)
            .unwrap();
    }
    engine.clear_calls();
    engine
}

// ── Style legality ───────────────────────────────────────────────

#[test]
fn style_calls_fail_while_loading() {
    let mut engine = MemoryEngine::new();
    assert!(!engine.is_style_loaded());
    assert_eq!(
        engine.add_source("s", &make_geojson().to_spec()),
        Err(EngineError::StyleNotLoaded)
    );
    assert!(engine.calls().is_empty());

    engine.finish_style_load();
    engine.add_source("s", &make_geojson().to_spec()).unwrap();
    assert_eq!(engine.calls(), &[EngineCall::AddSource { id: "s".into() }]);
}

#[test]
fn duplicate_source_rejected() {
    let mut engine = MemoryEngine::loaded();
    engine.add_source("s", &make_geojson().to_spec()).unwrap();
    assert_eq!(
        engine.add_source("s", &make_geojson().to_spec()),
        Err(EngineError::DuplicateSource("s".into()))
    );
}

#[test]
fn layer_requires_existing_source() {
    let mut engine = MemoryEngine::loaded();
    let result = engine.add_layer(&make_layer("missing").to_spec("l"), None);
    assert_eq!(result, Err(EngineError::SourceNotFound("missing".into())));
    assert!(engine.get_layer("l").is_none());
}

#[test]
fn source_in_use_cannot_be_removed() {
    let mut engine = make_engine_with_layers(&["l"]);
    assert_eq!(
        engine.remove_source("s"),
        Err(EngineError::SourceInUse {
            source_id: "s".into(),
            layer_id: "l".into(),
        })
    );
    engine.remove_layer("l").unwrap();
    engine.remove_source("s").unwrap();
    assert!(engine.get_source("s").is_none());
}

#[test]
fn before_id_must_exist() {
    let mut engine = make_engine_with_layers(&["a"]);
    let result = engine.add_layer(&make_layer("s").to_spec("b"), Some("nope"));
    assert_eq!(result, Err(EngineError::LayerNotFound("nope".into())));
}

// ── Layer ordering ───────────────────────────────────────────────

#[test]
fn add_layer_before_inserts_below() {
    let mut engine = make_engine_with_layers(&["a", "b"]);
    engine
        .add_layer(&make_layer("s").to_spec("c"), Some("b"))
        .unwrap();
    assert_eq!(engine.layer_ids(), vec!["a", "c", "b"]);
}

#[test]
fn move_layer_to_top_and_before() {
    let mut engine = make_engine_with_layers(&["a", "b", "c"]);
    engine.move_layer("a", None).unwrap();
    assert_eq!(engine.layer_ids(), vec!["b", "c", "a"]);
    engine.move_layer("a", Some("b")).unwrap();
    assert_eq!(engine.layer_ids(), vec!["a", "b", "c"]);
    assert_eq!(
        engine.calls(),
        &[
            EngineCall::MoveLayer {
                id: "a".into(),
                before_id: None
            },
            EngineCall::MoveLayer {
                id: "a".into(),
                before_id: Some("b".into())
            },
        ]
    );
}

#[test]
fn failed_move_keeps_order() {
    let mut engine = make_engine_with_layers(&["a", "b"]);
    assert!(engine.move_layer("a", Some("zzz")).is_err());
    assert_eq!(engine.layer_ids(), vec!["a", "b"]);
}

// ── Layer properties ─────────────────────────────────────────────

#[test]
fn paint_property_set_and_cleared() {
    let mut engine = make_engine_with_layers(&["l"]);
    engine
        .set_paint_property("l", "circle-color", Some(&json!("red")))
        .unwrap();
    assert_eq!(
        engine.layer_spec("l").unwrap().paint.get("circle-color"),
        Some(&json!("red"))
    );
    engine.set_paint_property("l", "circle-color", None).unwrap();
    assert!(engine.layer_spec("l").unwrap().paint.is_empty());
}

#[test]
fn zoom_range_validated() {
    let mut engine = make_engine_with_layers(&["l"]);
    assert!(engine.set_layer_zoom_range("l", 10.0, 2.0).is_err());
    engine.set_layer_zoom_range("l", 2.0, 10.0).unwrap();
    let spec = engine.layer_spec("l").unwrap();
    assert_eq!((spec.minzoom, spec.maxzoom), (Some(2.0), Some(10.0)));
}

// ── Source updates ───────────────────────────────────────────────

#[test]
fn set_data_only_on_geojson() {
    let mut engine = MemoryEngine::loaded();
    engine.add_source("g", &make_geojson().to_spec()).unwrap();
    engine
        .add_source(
            "r",
            &SourceProps::new("raster")
                .with_option("url", json!("mapbox://r"))
                .to_spec(),
        )
        .unwrap();

    engine.set_source_data("g", &json!({"type": "Point", "coordinates": [1, 1]})).unwrap();
    assert_eq!(
        engine.source_spec("g").unwrap().options.get("data"),
        Some(&json!({"type": "Point", "coordinates": [1, 1]}))
    );
    assert!(matches!(
        engine.set_source_data("r", &json!({})),
        Err(EngineError::UnsupportedOperation { .. })
    ));
}

#[test]
fn tile_updates_can_be_disabled() {
    let mut engine = MemoryEngine::loaded();
    engine.set_supports_tile_updates(false);
    engine
        .add_source("v", &SourceProps::new("vector").to_spec())
        .unwrap();
    assert!(!engine.get_source("v").unwrap().supports_tile_updates);
    assert!(engine.set_source_url("v", "mapbox://v2").is_err());
}

#[test]
fn reload_discards_style_but_keeps_overlays() {
    let mut engine = make_engine_with_layers(&["l"]);
    engine.add_marker("m", &MarkerProps::new(1.0, 2.0)).unwrap();
    engine
        .add_control("nav", &ControlProps::new(ControlType::Navigation).to_spec(), None)
        .unwrap();

    engine.begin_style_reload();
    assert!(!engine.is_style_loaded());
    assert!(engine.get_source("s").is_none());
    assert!(engine.layer_ids().is_empty());
    assert!(engine.marker("m").is_some());
    assert!(engine.has_control("nav"));
}

// ── Failure injection ────────────────────────────────────────────

#[test]
fn fail_on_is_one_shot() {
    let mut engine = make_engine_with_layers(&["l"]);
    engine.fail_on("set_filter");
    assert!(matches!(
        engine.set_filter("l", Some(&json!(["==", "a", 1]))),
        Err(EngineError::Rejected(_))
    ));
    assert!(engine.calls().is_empty());
    engine.set_filter("l", None).unwrap();
    assert_eq!(engine.calls().len(), 1);
}

// ── Overlays ─────────────────────────────────────────────────────

#[test]
fn marker_defaults_and_drag() {
    let mut engine = MemoryEngine::new();
    engine.add_marker("m", &MarkerProps::new(1.0, 2.0)).unwrap();
    let state = engine.marker("m").unwrap();
    assert!(!state.draggable);
    assert_eq!(state.rotation, 0.0);

    engine.take_calls();
    engine.drag_marker("m", LngLat::new(5.0, 6.0)).unwrap();
    assert_eq!(engine.marker("m").unwrap().lng_lat, LngLat::new(5.0, 6.0));
    assert!(engine.calls().is_empty());
}

#[test]
fn popup_class_names_and_close() {
    let mut engine = MemoryEngine::new();
    engine
        .add_popup("p", &PopupProps::new(0.0, 0.0).with_class_name("a b"))
        .unwrap();
    let state = engine.popup("p").unwrap();
    assert_eq!(state.max_width, "240px");
    assert_eq!(state.class_list.len(), 2);

    engine.add_popup_class_name("p", "c").unwrap();
    engine.remove_popup_class_name("p", "a").unwrap();
    let classes: Vec<_> = engine.popup("p").unwrap().class_list.into_iter().collect();
    assert_eq!(classes, vec!["b".to_string(), "c".to_string()]);

    engine.close_popup("p").unwrap();
    assert!(engine.popup("p").is_none());
    assert_eq!(engine.remove_popup("p"), Err(EngineError::PopupNotFound("p".into())));
}

#[test]
fn controls_added_once() {
    let mut engine = MemoryEngine::new();
    let spec = ControlProps::new(ControlType::Scale).to_spec();
    engine
        .add_control("scale", &spec, Some(ControlPosition::BottomLeft))
        .unwrap();
    assert_eq!(
        engine.add_control("scale", &spec, None),
        Err(EngineError::DuplicateControl("scale".into()))
    );
    assert_eq!(
        engine.control("scale").unwrap().position,
        Some(ControlPosition::BottomLeft)
    );
    engine.remove_control("scale").unwrap();
    assert!(!engine.has_control("scale"));
}
