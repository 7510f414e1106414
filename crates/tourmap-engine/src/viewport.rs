//! Starting-viewport resolution shared by tours and views

use std::collections::BTreeMap;

use tourmap_core::models::{Bounds, Geometry, StartOptions};
use tourmap_geo::bounds::{bounds_from_center_and_radius, validate_bounds};

use crate::diagnostics::{Diagnostic, Diagnostics, Scope};

/// Resolve a `start` block to bounds.
///
/// Explicit bounds win when valid. Otherwise a center (a located feature's
/// point, else explicit lat/long) plus a positive distance is expanded into
/// bounds. `locations` should cover both shown and hidden features.
pub(crate) fn resolve_start(
    start: &StartOptions,
    locations: &BTreeMap<String, Geometry>,
    scope: &Scope,
    diagnostics: &mut Diagnostics,
) -> Option<Bounds> {
    if let Some(raw) = &start.bounds {
        match validate_bounds(raw) {
            Some(bounds) => return Some(bounds),
            None => diagnostics.push(Diagnostic::InvalidStartBounds { scope: scope.clone() }),
        }
    }

    let center = locate(start, locations, scope, diagnostics).or(match (start.lat, start.long) {
        (Some(lat), Some(long)) => Some((lat, long)),
        _ => None,
    })?;

    match start.distance {
        Some(distance) if distance > 0.0 && distance.is_finite() => {
            let bounds = bounds_from_center_and_radius(center.0, center.1, distance);
            if bounds.is_none() {
                diagnostics.push(Diagnostic::InvalidStartBounds { scope: scope.clone() });
            }
            bounds
        }
        Some(_) => {
            diagnostics.push(Diagnostic::InvalidStartDistance { scope: scope.clone() });
            None
        }
        None => None,
    }
}

/// `(lat, long)` of the referenced feature when it is a point
fn locate(
    start: &StartOptions,
    locations: &BTreeMap<String, Geometry>,
    scope: &Scope,
    diagnostics: &mut Diagnostics,
) -> Option<(f64, f64)> {
    let id = start.location.as_deref().filter(|id| !id.trim().is_empty())?;
    match locations.get(id).and_then(Geometry::as_point) {
        Some([long, lat]) => Some((lat, long)),
        None => {
            diagnostics.push(Diagnostic::UnresolvedLocation {
                scope: scope.clone(),
                id: id.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn locations() -> BTreeMap<String, Geometry> {
        let mut map = BTreeMap::new();
        map.insert("port".to_string(), Geometry::point(170.0, 10.0));
        map.insert("route".to_string(), Geometry::line_string(vec![[0.0, 0.0], [1.0, 1.0]]));
        map
    }

    fn resolve(start: &StartOptions) -> (Option<Bounds>, Vec<Diagnostic>) {
        let mut diagnostics = Diagnostics::default();
        let bounds = resolve_start(start, &locations(), &Scope::Tour, &mut diagnostics);
        (bounds, diagnostics.into_vec())
    }

    #[test]
    fn test_explicit_bounds_win() {
        let start = StartOptions {
            bounds: Some(json!({ "south": 1, "west": 2, "north": 3, "east": 4 })),
            location: Some("port".to_string()),
            distance: Some(5.0),
            ..Default::default()
        };
        assert_eq!(resolve(&start), (Some(Bounds::new(1.0, 2.0, 3.0, 4.0)), vec![]));
    }

    #[test]
    fn test_location_with_distance() {
        let start = StartOptions {
            location: Some("port".to_string()),
            distance: Some(20.0),
            ..Default::default()
        };
        let (bounds, diagnostics) = resolve(&start);
        assert_eq!(bounds, Some(Bounds::new(-10.0, 150.0, 30.0, -170.0)));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_non_point_location_falls_through_to_lat_long() {
        let start = StartOptions {
            location: Some("route".to_string()),
            lat: Some(0.0),
            long: Some(0.0),
            distance: Some(1.0),
            ..Default::default()
        };
        let (bounds, diagnostics) = resolve(&start);
        assert_eq!(bounds, Some(Bounds::new(-1.0, -1.0, 1.0, 1.0)));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::UnresolvedLocation { scope: Scope::Tour, id: "route".to_string() }]
        );
    }

    #[test]
    fn test_invalid_bounds_fall_through() {
        let start = StartOptions {
            bounds: Some(json!({ "south": -100, "west": 0, "north": 0, "east": 0 })),
            lat: Some(0.0),
            long: Some(0.0),
            distance: Some(2.0),
            ..Default::default()
        };
        let (bounds, diagnostics) = resolve(&start);
        assert_eq!(bounds, Some(Bounds::new(-2.0, -2.0, 2.0, 2.0)));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_no_override() {
        assert_eq!(resolve(&StartOptions::default()), (None, vec![]));

        let no_distance = StartOptions { lat: Some(1.0), long: Some(1.0), ..Default::default() };
        assert_eq!(resolve(&no_distance), (None, vec![]));

        let zero = StartOptions {
            lat: Some(1.0),
            long: Some(1.0),
            distance: Some(0.0),
            ..Default::default()
        };
        let (bounds, diagnostics) = resolve(&zero);
        assert_eq!(bounds, None);
        assert_eq!(diagnostics, vec![Diagnostic::InvalidStartDistance { scope: Scope::Tour }]);
    }
}
