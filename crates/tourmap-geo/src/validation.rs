//! Structural validation of raw coordinate trees.
//!
//! Input is the untyped `coordinates` member of a GeoJSON geometry. Output is a
//! typed [`Geometry`] or `None`. Checks are purely structural and numeric:
//! self-intersecting or degenerate shapes pass as long as every position is
//! in range.

use crate::models::{Geometry, GeometryType, Position};
use serde_json::Value;

/// Validate a coordinate tree against a geometry type
pub fn validate_geometry(coordinates: &Value, kind: GeometryType) -> Option<Geometry> {
    match kind {
        GeometryType::Point => {
            validate_point(coordinates, false).map(|coordinates| Geometry::Point { coordinates })
        }
        GeometryType::MultiPoint => validate_multi_point(coordinates)
            .map(|coordinates| Geometry::MultiPoint { coordinates }),
        GeometryType::LineString => validate_line_string(coordinates)
            .map(|coordinates| Geometry::LineString { coordinates }),
        GeometryType::MultiLineString => validate_multi_line_string(coordinates)
            .map(|coordinates| Geometry::MultiLineString { coordinates }),
        GeometryType::Polygon => {
            validate_polygon(coordinates).map(|coordinates| Geometry::Polygon { coordinates })
        }
        GeometryType::MultiPolygon => validate_multi_polygon(coordinates)
            .map(|coordinates| Geometry::MultiPolygon { coordinates }),
    }
}

/// Validate a single position.
///
/// Positions are `[longitude, latitude]`, or `[latitude, longitude]` when
/// `reversed` is set. The returned pair keeps the input order.
pub fn validate_point(value: &Value, reversed: bool) -> Option<Position> {
    let items = value.as_array()?;
    if items.len() != 2 {
        return None;
    }

    let first = number(&items[0])?;
    let second = number(&items[1])?;
    let (long, lat) = if reversed { (second, first) } else { (first, second) };

    if !(-180.0..=180.0).contains(&long) || !(-90.0..=90.0).contains(&lat) {
        return None;
    }

    Some([first, second])
}

/// Non-empty list of valid positions
pub fn validate_multi_point(value: &Value) -> Option<Vec<Position>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    items.iter().map(|item| validate_point(item, false)).collect()
}

/// Same shape rule as a MultiPoint
pub fn validate_line_string(value: &Value) -> Option<Vec<Position>> {
    validate_multi_point(value)
}

/// List of valid LineStrings; an empty list is accepted
pub fn validate_multi_line_string(value: &Value) -> Option<Vec<Vec<Position>>> {
    value.as_array()?.iter().map(validate_line_string).collect()
}

/// A closed linear ring of at least four positions.
///
/// An open ring with at least three distinct positions is closed by repeating
/// its first position at the end.
pub fn validate_ring(value: &Value) -> Option<Vec<Position>> {
    let mut ring = validate_multi_point(value)?;

    let first = ring[0];
    let last = ring[ring.len() - 1];
    if first != last && distinct_at_least(&ring, 3) {
        ring.push(first);
    }

    if ring.len() < 4 || ring[0] != ring[ring.len() - 1] {
        return None;
    }
    Some(ring)
}

/// Non-empty list of valid rings
pub fn validate_polygon(value: &Value) -> Option<Vec<Vec<Position>>> {
    let rings = value.as_array()?;
    if rings.is_empty() {
        return None;
    }
    rings.iter().map(validate_ring).collect()
}

/// Non-empty list of valid polygons
pub fn validate_multi_polygon(value: &Value) -> Option<Vec<Vec<Vec<Position>>>> {
    let polygons = value.as_array()?;
    if polygons.is_empty() {
        return None;
    }
    polygons.iter().map(validate_polygon).collect()
}

fn distinct_at_least(positions: &[Position], count: usize) -> bool {
    let mut seen: Vec<Position> = Vec::with_capacity(count);
    for position in positions {
        if !seen.contains(position) {
            seen.push(*position);
            if seen.len() >= count {
                return true;
            }
        }
    }
    false
}

/// A finite number, given either as a JSON number or a numeric string
fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
