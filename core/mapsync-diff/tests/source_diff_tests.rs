use mapsync_diff::{DiffError, SourceOp, changed_keys, diff_source};
use mapsync_model::SourceProps;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn make_point(x: i64, y: i64) -> Value {
    json!({"type": "Point", "coordinates": [x, y]})
}

fn make_image(url: &str, coordinates: Value) -> SourceProps {
    SourceProps::new("image")
        .with_option("url", json!(url))
        .with_option("coordinates", coordinates)
}

fn make_corners(shift: i64) -> Value {
    json!([[shift, 1], [shift + 1, 1], [shift + 1, 0], [shift, 0]])
}

// ── No-op ────────────────────────────────────────────────────────

#[test]
fn identical_props_produce_nothing() {
    let props = SourceProps::geojson(make_point(0, 0)).with_id("s");
    assert_eq!(diff_source("s", &props, &props.clone(), true), Ok(vec![]));
}

#[test]
fn integer_and_float_data_compare_equal() {
    let prev = SourceProps::geojson(json!({"coordinates": [1, 2]}));
    let next = SourceProps::geojson(json!({"coordinates": [1.0, 2.0]}));
    assert_eq!(diff_source("s", &prev, &next, true), Ok(vec![]));
}

// ── GeoJSON ──────────────────────────────────────────────────────

#[test]
fn geojson_data_change_sets_data() {
    let prev = SourceProps::geojson(make_point(0, 0));
    let next = SourceProps::geojson(make_point(1, 1));
    assert_eq!(
        diff_source("s", &prev, &next, true),
        Ok(vec![SourceOp::SetData(make_point(1, 1))])
    );
}

#[test]
fn geojson_data_and_cluster_change_is_unresolvable() {
    let prev = SourceProps::geojson(make_point(0, 0));
    let next = SourceProps::geojson(make_point(1, 1)).with_option("cluster", json!(true));
    assert_eq!(
        diff_source("s", &prev, &next, true),
        Err(DiffError::Unresolvable {
            kind: "source",
            id: "s".into(),
            keys: vec!["cluster".into(), "data".into()],
        })
    );
}

// ── Image / video ────────────────────────────────────────────────

#[test]
fn image_url_change_carries_both_fields() {
    let prev = make_image("a.png", make_corners(0));
    let next = make_image("b.png", make_corners(0));
    assert_eq!(
        diff_source("img", &prev, &next, true),
        Ok(vec![SourceOp::UpdateImage {
            url: Some(json!("b.png")),
            coordinates: Some(make_corners(0)),
        }])
    );
}

#[test]
fn image_url_and_coordinates_together_update_image() {
    let prev = make_image("a.png", make_corners(0));
    let next = make_image("b.png", make_corners(5));
    let ops = diff_source("img", &prev, &next, true).unwrap();
    assert_eq!(ops.len(), 1);
    assert!(matches!(ops[0], SourceOp::UpdateImage { .. }));
}

#[test]
fn video_coordinates_only_sets_coordinates() {
    let prev = SourceProps::new("video")
        .with_option("urls", json!(["a.mp4"]))
        .with_option("coordinates", make_corners(0));
    let next = SourceProps::new("video")
        .with_option("urls", json!(["a.mp4"]))
        .with_option("coordinates", make_corners(2));
    assert_eq!(
        diff_source("v", &prev, &next, true),
        Ok(vec![SourceOp::SetCoordinates(make_corners(2))])
    );
}

#[test]
fn video_urls_and_coordinates_is_unresolvable() {
    let prev = SourceProps::new("video")
        .with_option("urls", json!(["a.mp4"]))
        .with_option("coordinates", make_corners(0));
    let next = SourceProps::new("video")
        .with_option("urls", json!(["b.mp4"]))
        .with_option("coordinates", make_corners(2));
    assert!(matches!(
        diff_source("v", &prev, &next, true),
        Err(DiffError::Unresolvable { .. })
    ));
}

// ── Tiled sources ────────────────────────────────────────────────

#[test]
fn vector_url_change_sets_url() {
    let prev = SourceProps::new("vector").with_option("url", json!("mapbox://a"));
    let next = SourceProps::new("vector").with_option("url", json!("mapbox://b"));
    assert_eq!(
        diff_source("v", &prev, &next, true),
        Ok(vec![SourceOp::SetUrl("mapbox://b".into())])
    );
}

#[test]
fn vector_tiles_change_sets_tiles() {
    let prev = SourceProps::new("vector").with_option("tiles", json!(["https://a/{z}/{x}/{y}"]));
    let next = SourceProps::new("vector").with_option("tiles", json!(["https://b/{z}/{x}/{y}"]));
    assert_eq!(
        diff_source("v", &prev, &next, true),
        Ok(vec![SourceOp::SetTiles(vec!["https://b/{z}/{x}/{y}".into()])])
    );
}

#[test]
fn raster_sources_take_url_and_tile_updates() {
    let prev = SourceProps::new("raster").with_option("url", json!("mapbox://a"));
    let next = SourceProps::new("raster").with_option("url", json!("mapbox://b"));
    assert_eq!(
        diff_source("r", &prev, &next, true),
        Ok(vec![SourceOp::SetUrl("mapbox://b".into())])
    );

    let prev = SourceProps::new("raster-dem").with_option("tiles", json!(["https://a/{z}/{x}/{y}"]));
    let next = SourceProps::new("raster-dem").with_option("tiles", json!(["https://b/{z}/{x}/{y}"]));
    assert_eq!(
        diff_source("dem", &prev, &next, true),
        Ok(vec![SourceOp::SetTiles(vec!["https://b/{z}/{x}/{y}".into()])])
    );
}

#[test]
fn vector_url_without_tile_updates_is_unresolvable() {
    let prev = SourceProps::new("vector").with_option("url", json!("mapbox://a"));
    let next = SourceProps::new("vector").with_option("url", json!("mapbox://b"));
    assert!(diff_source("v", &prev, &next, false).is_err());
}

#[test]
fn raster_tile_size_change_is_unresolvable() {
    let prev = SourceProps::new("raster").with_option("tileSize", json!(256));
    let next = SourceProps::new("raster").with_option("tileSize", json!(512));
    assert_eq!(
        diff_source("r", &prev, &next, true),
        Err(DiffError::Unresolvable {
            kind: "source",
            id: "r".into(),
            keys: vec!["tileSize".into()],
        })
    );
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn type_change_is_rejected() {
    let prev = SourceProps::geojson(make_point(0, 0));
    let next = SourceProps::new("vector");
    assert!(matches!(
        diff_source("s", &prev, &next, true),
        Err(DiffError::TypeChanged { .. })
    ));
}

#[test]
fn id_change_is_rejected() {
    let prev = SourceProps::geojson(make_point(0, 0)).with_id("a");
    let next = SourceProps::geojson(make_point(0, 0)).with_id("b");
    assert!(matches!(
        diff_source("a", &prev, &next, true),
        Err(DiffError::IdChanged { .. })
    ));
}

// ── Changed keys ─────────────────────────────────────────────────

#[test]
fn removed_key_counts_as_changed() {
    let prev = SourceProps::geojson(make_point(0, 0)).with_option("maxzoom", json!(14));
    let next = SourceProps::geojson(make_point(0, 0));
    assert_eq!(changed_keys(&prev.options, &next.options), vec!["maxzoom".to_string()]);
}
