//! Bounding-box validation and center/radius arithmetic.
//!
//! All angles are degrees. A box is valid when both corners are in range;
//! south/north and west/east are never compared, so a box whose south edge
//! lies north of its north edge is accepted as is.

use crate::models::Bounds;
use crate::validation::validate_point;
use serde_json::Value;

const BOUNDS_KEYS: [&str; 4] = ["south", "west", "north", "east"];

/// Validate a raw `{south, west, north, east}` map.
///
/// The map must have exactly these four keys. Each corner is checked as a
/// `[lat, long]` position.
pub fn validate_bounds(value: &Value) -> Option<Bounds> {
    let map = value.as_object()?;
    if map.len() != BOUNDS_KEYS.len() || !BOUNDS_KEYS.iter().all(|key| map.contains_key(*key)) {
        return None;
    }

    let corner = |lat: &str, long: &str| {
        validate_point(&Value::Array(vec![map[lat].clone(), map[long].clone()]), true)
    };
    let south_west = corner("south", "west")?;
    let north_east = corner("north", "east")?;

    Some(Bounds::new(south_west[0], south_west[1], north_east[0], north_east[1]))
}

/// Range-check an already typed box
pub fn check_bounds(bounds: &Bounds) -> Option<Bounds> {
    let in_range = |lat: f64, long: f64| {
        lat.is_finite()
            && long.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&long)
    };
    (in_range(bounds.south, bounds.west) && in_range(bounds.north, bounds.east)).then_some(*bounds)
}

/// Move a latitude by `delta`, folding a single pole crossing back into range.
///
/// A crossing is reflected and negated (`80 + 110` lands on `10`). Sums that
/// would cross twice (beyond ±270) clamp to the nearer pole.
pub fn shift_latitude(lat: f64, delta: f64) -> f64 {
    let shifted = lat + delta;
    if (-90.0..=90.0).contains(&shifted) {
        shifted
    } else if shifted > 90.0 && shifted <= 270.0 {
        shifted - 180.0
    } else if (-270.0..-90.0).contains(&shifted) {
        shifted + 180.0
    } else if shifted > 270.0 {
        90.0
    } else {
        -90.0
    }
}

/// Move a longitude by `delta`, wrapping around the antimeridian
pub fn shift_longitude(long: f64, delta: f64) -> f64 {
    (long + delta + 180.0).rem_euclid(360.0) - 180.0
}

/// Square box of `radius` degrees around a `(lat, long)` center.
///
/// Returns `None` for a non-positive radius, an out-of-range center, or a
/// result that fails [`check_bounds`].
pub fn bounds_from_center_and_radius(lat: f64, long: f64, radius: f64) -> Option<Bounds> {
    if !radius.is_finite() || radius <= 0.0 {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&long) {
        return None;
    }

    check_bounds(&Bounds {
        north: shift_latitude(lat, radius),
        south: shift_latitude(lat, -radius),
        east: shift_longitude(long, radius),
        west: shift_longitude(long, -radius),
    })
}
