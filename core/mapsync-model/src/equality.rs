use mapsync_types::Point;
use serde_json::Value;

/// Structural equality over JSON values.
///
/// Differs from `Value::eq` only for numbers, which compare by numeric
/// value (`1` equals `1.0`).
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        _ => a == b,
    }
}

/// [`deep_equal`] for possibly-absent values; two absent values are equal.
pub fn deep_equal_opt(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => deep_equal(a, b),
        _ => false,
    }
}

/// Compares two pixel offsets.
pub fn points_equal(a: Point, b: Point) -> bool {
    a.x == b.x && a.y == b.y
}
