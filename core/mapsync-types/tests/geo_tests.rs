use mapsync_types::{Alignment, Anchor, ControlPosition, LngLat, LngLatBounds, Point};
use serde_json::json;

#[test]
fn lng_lat_serializes_as_pair() {
    let value = serde_json::to_value(LngLat::new(-122.0, 38.0)).unwrap();
    assert_eq!(value, json!([-122.0, 38.0]));

    let parsed: LngLat = serde_json::from_value(json!([1.5, 2.5])).unwrap();
    assert_eq!(parsed, LngLat::new(1.5, 2.5));
}

#[test]
fn point_serializes_as_pair() {
    let parsed: Point = serde_json::from_value(json!([0, 1])).unwrap();
    assert_eq!(parsed, Point::new(0.0, 1.0));
}

#[test]
fn anchor_uses_kebab_case() {
    let parsed: Anchor = serde_json::from_value(json!("bottom-left")).unwrap();
    assert_eq!(parsed, Anchor::BottomLeft);
    assert_eq!("top-right".parse::<Anchor>().unwrap(), Anchor::TopRight);
    assert_eq!(Anchor::TopLeft.to_string(), "top-left");
    assert!("middle".parse::<Anchor>().is_err());
}

#[test]
fn alignment_defaults_to_auto() {
    assert_eq!(Alignment::default(), Alignment::Auto);
    assert_eq!("viewport".parse::<Alignment>().unwrap(), Alignment::Viewport);
}

#[test]
fn control_position_defaults_to_top_right() {
    assert_eq!(ControlPosition::default(), ControlPosition::TopRight);
    let parsed: ControlPosition = serde_json::from_value(json!("bottom-left")).unwrap();
    assert_eq!(parsed, ControlPosition::BottomLeft);
}

#[test]
fn bounds_contains_is_inclusive() {
    let bounds = LngLatBounds {
        sw: LngLat::new(-10.0, -5.0),
        ne: LngLat::new(10.0, 5.0),
    };
    assert!(bounds.contains(LngLat::new(0.0, 0.0)));
    assert!(bounds.contains(LngLat::new(10.0, 5.0)));
    assert!(!bounds.contains(LngLat::new(10.1, 0.0)));
}
