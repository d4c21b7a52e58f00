//! End-to-end tests for scenario replay.

use mapsync_replay::{ReplayError, Scenario, load_scenario, render_text, run_scenario};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn make_scenario(value: serde_json::Value) -> Scenario {
    serde_json::from_value(value).unwrap()
}

fn methods(report: &mapsync_replay::Report, step: usize) -> Vec<String> {
    report.steps[step]
        .calls
        .iter()
        .map(|c| format!("{}({})", c.method(), c.target()))
        .collect()
}

fn source_and_layer_steps() -> serde_json::Value {
    json!([
        {
            "step": "mount",
            "name": "s",
            "declaration": {"kind": "source", "id": "S", "type": "geojson", "data": {"type": "FeatureCollection", "features": []}}
        },
        {
            "step": "mount_child",
            "name": "l",
            "parent": "s",
            "layer": {"id": "L", "type": "fill", "paint": {"fill-color": "red"}}
        }
    ])
}

// ── Loading ─────────────────────────────────────────────────────

#[test]
fn load_scenario_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    let body = json!({"style_loaded": true, "steps": source_and_layer_steps()});
    write!(file, "{body}").unwrap();

    let scenario = load_scenario(file.path()).unwrap();
    assert!(scenario.style_loaded);
    assert_eq!(scenario.steps.len(), 2);
    assert_eq!(scenario.config.deferral_warning_passes, 8);
}

#[test]
fn load_scenario_rejects_invalid_json() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"steps\": [{{\"step\": \"explode\"}}]}}").unwrap();

    let err = load_scenario(file.path()).unwrap_err();
    assert!(matches!(err, ReplayError::Json(_)));
}

#[test]
fn load_scenario_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_scenario(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn bundled_scenario_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/end_to_end.json");
    let scenario = load_scenario(&path).unwrap();
    assert_eq!(scenario.steps.len(), 9);
}

// ── Replay ──────────────────────────────────────────────────────

#[test]
fn deferred_entities_materialize_on_style_load() {
    let mut steps = source_and_layer_steps();
    steps.as_array_mut().unwrap().push(json!({"step": "finish_style_load"}));
    let report = run_scenario(&make_scenario(json!({"steps": steps}))).unwrap();

    assert!(methods(&report, 0).is_empty());
    assert!(methods(&report, 1).is_empty());
    assert_eq!(methods(&report, 2), vec!["add_source(S)", "add_layer(L)"]);
    assert_eq!(report.diagnostics().count(), 0);
}

#[test]
fn update_emits_only_the_changed_property() {
    let mut steps = source_and_layer_steps();
    steps.as_array_mut().unwrap().push(json!({
        "step": "update",
        "name": "l",
        "declaration": {"kind": "layer", "id": "L", "type": "fill", "paint": {"fill-color": "blue"}}
    }));
    let report = run_scenario(&make_scenario(json!({"style_loaded": true, "steps": steps}))).unwrap();

    assert_eq!(methods(&report, 2), vec!["set_paint_property(L)"]);
}

#[test]
fn dragged_marker_is_restored_on_reconcile() {
    let report = run_scenario(&make_scenario(json!({
        "style_loaded": true,
        "steps": [
            {"step": "mount", "name": "m", "declaration": {"kind": "marker", "id": "m", "longitude": 1.0, "latitude": 2.0}},
            {"step": "drag_marker", "id": "m", "lng_lat": [3.0, 4.0]},
            {"step": "reconcile_all"}
        ]
    })))
    .unwrap();

    assert_eq!(methods(&report, 0), vec!["add_marker(m)"]);
    assert!(methods(&report, 1).is_empty());
    assert_eq!(methods(&report, 2), vec!["set_marker_lng_lat(m)"]);
}

#[test]
fn reload_rebuilds_style_entities() {
    let mut steps = source_and_layer_steps();
    let list = steps.as_array_mut().unwrap();
    list.push(json!({"step": "begin_reload"}));
    list.push(json!({"step": "style_data"}));
    list.push(json!({"step": "finish_style_load"}));
    let report = run_scenario(&make_scenario(json!({"style_loaded": true, "steps": steps}))).unwrap();

    assert!(methods(&report, 2).is_empty());
    assert!(methods(&report, 3).is_empty());
    assert_eq!(methods(&report, 4), vec!["add_source(S)", "add_layer(L)"]);
}

#[test]
fn outcomes_name_the_entities() {
    let report = run_scenario(&make_scenario(json!({"style_loaded": true, "steps": source_and_layer_steps()}))).unwrap();

    let outcome = &report.steps[1].outcomes[0];
    assert_eq!(outcome.name, "l");
    assert_eq!(outcome.id, "L");
    assert_eq!(outcome.outcome.to_string(), "created");
}

#[test]
fn kind_change_surfaces_as_diagnostic() {
    let report = run_scenario(&make_scenario(json!({
        "style_loaded": true,
        "steps": [
            {"step": "mount", "name": "x", "declaration": {"kind": "marker", "id": "x", "longitude": 0.0, "latitude": 0.0}},
            {"step": "update", "name": "x", "declaration": {"kind": "popup", "id": "x", "longitude": 0.0, "latitude": 0.0}}
        ]
    })))
    .unwrap();

    assert_eq!(report.steps[1].diagnostics.len(), 1);
    assert!(methods(&report, 1).is_empty());
}

// ── Errors ──────────────────────────────────────────────────────

#[test]
fn unknown_name_stops_the_replay() {
    let err = run_scenario(&make_scenario(json!({
        "steps": [{"step": "unmount", "name": "ghost"}]
    })))
    .unwrap_err();

    assert!(matches!(err, ReplayError::UnknownName { step: 0, .. }));
}

#[test]
fn duplicate_name_stops_the_replay() {
    let err = run_scenario(&make_scenario(json!({
        "steps": [
            {"step": "mount", "name": "c", "declaration": {"kind": "control", "type": "navigation"}},
            {"step": "mount", "name": "c", "declaration": {"kind": "control", "type": "scale"}}
        ]
    })))
    .unwrap_err();

    assert!(matches!(err, ReplayError::DuplicateName { step: 1, .. }));
}

#[test]
fn child_of_a_non_source_is_a_sync_error() {
    let err = run_scenario(&make_scenario(json!({
        "steps": [
            {"step": "mount", "name": "m", "declaration": {"kind": "marker", "longitude": 0.0, "latitude": 0.0}},
            {"step": "mount_child", "name": "l", "parent": "m", "layer": {"type": "line"}}
        ]
    })))
    .unwrap_err();

    assert!(matches!(err, ReplayError::Sync { step: 1, .. }));
}

#[test]
fn closing_a_missing_popup_is_an_engine_error() {
    let err = run_scenario(&make_scenario(json!({
        "steps": [{"step": "close_popup", "id": "nope"}]
    })))
    .unwrap_err();

    assert!(matches!(err, ReplayError::Engine { step: 0, .. }));
}

// ── Rendering ───────────────────────────────────────────────────

#[test]
fn text_rendering_lists_calls() {
    let report = run_scenario(&make_scenario(json!({"style_loaded": true, "steps": source_and_layer_steps()}))).unwrap();
    let text = render_text(&report);

    assert!(text.contains("[0] mount s"));
    assert!(text.contains("-> add_source(S)"));
    assert!(text.contains("-> add_layer(L)"));
}

#[test]
fn json_report_flattens_outcomes() {
    let report = run_scenario(&make_scenario(json!({"style_loaded": true, "steps": source_and_layer_steps()}))).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    let outcome = &value["steps"][0]["outcomes"][0];
    assert_eq!(outcome["name"], "s");
    assert_eq!(outcome["outcome"], "created");
    assert_eq!(value["steps"][0]["calls"][0]["call"], "add_source");
}
