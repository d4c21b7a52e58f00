use mapsync_engine::{ControlEngine, EngineCall, MarkerEngine, MemoryEngine, PopupEngine};
use mapsync_model::{ControlProps, ControlType, MarkerProps, PopupProps};
use mapsync_types::{Alignment, Anchor, ControlPosition, LngLat};
use mapsync_sync::{MapSync, MapSyncConfig, ReconcileOutcome};
use pretty_assertions::assert_eq;
use serde_json::json;

fn make_map() -> MapSync<MemoryEngine> {
    MapSync::new(MemoryEngine::new(), MapSyncConfig::default())
}

fn make_marker(lng: f64, lat: f64) -> MarkerProps {
    MarkerProps {
        draggable: Some(true),
        ..MarkerProps::new(lng, lat).with_id("m")
    }
}

fn make_popup(class_name: &str) -> PopupProps {
    PopupProps::new(10.0, 20.0).with_id("p").with_class_name(class_name)
}

// ── Markers ──────────────────────────────────────────────────────

#[test]
fn markers_do_not_wait_for_the_style() {
    let mut map = make_map();
    let (_, outcome) = map.mount(make_marker(1.0, 2.0));
    assert_eq!(outcome, ReconcileOutcome::Created);
    assert_eq!(map.engine().calls(), &[EngineCall::AddMarker { id: "m".into() }]);
}

#[test]
fn dragged_marker_matching_declaration_is_left_alone() {
    let mut map = make_map();
    let (m, _) = map.mount(make_marker(1.0, 2.0));
    map.engine_mut().drag_marker("m", LngLat::new(5.0, 6.0)).unwrap();
    map.engine_mut().clear_calls();

    // The owner picked up the drag end and re-declared the new position.
    let outcome = map.update(m, make_marker(5.0, 6.0)).unwrap();
    assert_eq!(outcome, ReconcileOutcome::Unchanged);
    assert!(map.engine().calls().is_empty());
}

#[test]
fn declared_position_wins_over_stale_live_position() {
    let mut map = make_map();
    let (m, _) = map.mount(make_marker(1.0, 2.0));
    map.engine_mut().drag_marker("m", LngLat::new(5.0, 6.0)).unwrap();
    map.engine_mut().clear_calls();

    map.update(m, make_marker(1.0, 2.0)).unwrap();
    assert_eq!(
        map.engine().calls(),
        &[EngineCall::SetMarkerLngLat { id: "m".into() }]
    );
    assert_eq!(map.engine().marker("m").unwrap().lng_lat, LngLat::new(1.0, 2.0));
}

#[test]
fn marker_fields_update_independently() {
    let mut map = make_map();
    let (m, _) = map.mount(make_marker(1.0, 2.0));
    map.engine_mut().clear_calls();

    let next = MarkerProps {
        rotation: Some(45.0),
        pitch_alignment: Some(Alignment::Map),
        ..make_marker(1.0, 2.0).with_popup("p")
    };
    assert_eq!(map.update(m, next).unwrap(), ReconcileOutcome::Updated { ops: 3 });
    assert_eq!(
        map.engine().calls(),
        &[
            EngineCall::SetMarkerRotation { id: "m".into() },
            EngineCall::SetMarkerPitchAlignment { id: "m".into() },
            EngineCall::SetMarkerPopup {
                id: "m".into(),
                popup: Some("p".into())
            },
        ]
    );
}

#[test]
fn undeclared_marker_fields_are_not_pushed() {
    let mut map = make_map();
    let (m, _) = map.mount(make_marker(1.0, 2.0));
    map.engine_mut().set_marker_rotation("m", 90.0).unwrap();
    map.engine_mut().clear_calls();

    let next = MarkerProps {
        rotation: None,
        ..make_marker(1.0, 2.0)
    };
    assert_eq!(map.update(m, next).unwrap(), ReconcileOutcome::Unchanged);
    assert_eq!(map.engine().marker("m").unwrap().rotation, 90.0);
}

#[test]
fn unmount_removes_marker() {
    let mut map = make_map();
    let (m, _) = map.mount(make_marker(1.0, 2.0));
    assert_eq!(map.unmount(m).unwrap(), ReconcileOutcome::Removed);
    assert!(map.engine().marker("m").is_none());
}

// ── Popups ───────────────────────────────────────────────────────

#[test]
fn class_list_is_diffed_as_sets() {
    let mut map = make_map();
    let (p, _) = map.mount(make_popup("a b"));
    map.engine_mut().clear_calls();

    assert_eq!(
        map.update(p, make_popup("b c")).unwrap(),
        ReconcileOutcome::Updated { ops: 2 }
    );
    assert_eq!(
        map.engine().calls(),
        &[
            EngineCall::RemovePopupClassName {
                id: "p".into(),
                class: "a".into()
            },
            EngineCall::AddPopupClassName {
                id: "p".into(),
                class: "c".into()
            },
        ]
    );
}

#[test]
fn popup_position_anchor_and_width() {
    let mut map = make_map();
    let (p, _) = map.mount(make_popup("a"));
    map.engine_mut().clear_calls();

    let next = PopupProps {
        longitude: 11.0,
        anchor: Some(Anchor::Top),
        max_width: Some("300px".into()),
        ..make_popup("a")
    };
    assert_eq!(map.update(p, next).unwrap(), ReconcileOutcome::Updated { ops: 3 });
    let live = map.engine().popup("p").unwrap();
    assert_eq!(live.lng_lat, LngLat::new(11.0, 20.0));
    assert_eq!(live.anchor, Some(Anchor::Top));
    assert_eq!(live.max_width, "300px");
}

#[test]
fn closed_popup_is_not_reopened() {
    let mut map = make_map();
    let (p, _) = map.mount(make_popup("a"));
    map.engine_mut().close_popup("p").unwrap();
    map.engine_mut().clear_calls();

    let moved = PopupProps {
        latitude: 30.0,
        ..make_popup("a")
    };
    assert_eq!(map.update(p, moved).unwrap(), ReconcileOutcome::Skipped);
    assert_eq!(map.unmount(p).unwrap(), ReconcileOutcome::Skipped);
    assert!(map.engine().calls().is_empty());
}

#[test]
fn unmount_removes_open_popup() {
    let mut map = make_map();
    let (p, _) = map.mount(make_popup("a"));
    assert_eq!(map.unmount(p).unwrap(), ReconcileOutcome::Removed);
    assert!(map.engine().popup("p").is_none());
}

// ── Controls ─────────────────────────────────────────────────────

#[test]
fn control_lifecycle() {
    let mut map = make_map();
    let nav = ControlProps::new(ControlType::Navigation).with_option("showCompass", json!(false));
    let (c, outcome) = map.mount(nav.clone());
    assert_eq!(outcome, ReconcileOutcome::Created);
    assert!(map.engine().has_control("mapsync-control-0"));

    assert_eq!(map.update(c, nav.clone()).unwrap(), ReconcileOutcome::Unchanged);

    let moved = nav.with_position(ControlPosition::BottomLeft);
    assert_eq!(map.update(c, moved).unwrap(), ReconcileOutcome::Updated { ops: 2 });
    assert_eq!(
        map.engine().control("mapsync-control-0").unwrap().position,
        Some(ControlPosition::BottomLeft)
    );

    assert_eq!(map.unmount(c).unwrap(), ReconcileOutcome::Removed);
    let methods: Vec<_> = map.engine().calls().iter().map(EngineCall::method).collect();
    assert_eq!(
        methods,
        vec!["add_control", "remove_control", "add_control", "remove_control"]
    );
}

#[test]
fn existing_control_is_not_added_twice() {
    let mut engine = MemoryEngine::new();
    let scale = ControlProps {
        id: Some("scale".into()),
        ..ControlProps::new(ControlType::Scale)
    };
    engine.add_control("scale", &scale.to_spec(), None).unwrap();
    engine.clear_calls();

    let mut map = MapSync::new(engine, MapSyncConfig::default());
    let (_, outcome) = map.mount(scale);
    assert_eq!(outcome, ReconcileOutcome::Unchanged);
    assert!(map.engine().calls().is_empty());
}
