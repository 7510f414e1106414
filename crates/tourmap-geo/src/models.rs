//! Geometry models for tourmap-geo.
//!
//! This module re-exports canonical types from `tourmap-core` and provides
//! conversions to the `geo` and `geojson` crate types.

use geo::BoundingRect;
use geo::Geometry as GeoGeometry;

// Re-export canonical types from tourmap-core
pub use tourmap_core::models::{Bounds, Geometry, GeometryType, Position};

fn coord(position: &Position) -> geo::Coord {
    geo::Coord { x: position[0], y: position[1] }
}

fn line(positions: &[Position]) -> geo::LineString {
    geo::LineString::new(positions.iter().map(coord).collect())
}

fn polygon(rings: &[Vec<Position>]) -> geo::Polygon {
    match rings.split_first() {
        Some((exterior, interiors)) => {
            geo::Polygon::new(line(exterior), interiors.iter().map(|ring| line(ring)).collect())
        }
        None => geo::Polygon::new(geo::LineString::new(vec![]), vec![]),
    }
}

/// Convert a canonical Geometry to a geo::Geometry
pub fn to_geo_geometry(geom: &Geometry) -> GeoGeometry {
    match geom {
        Geometry::Point { coordinates } => GeoGeometry::Point(geo::Point::from(coord(coordinates))),
        Geometry::MultiPoint { coordinates } => GeoGeometry::MultiPoint(geo::MultiPoint::new(
            coordinates.iter().map(|c| geo::Point::from(coord(c))).collect(),
        )),
        Geometry::LineString { coordinates } => GeoGeometry::LineString(line(coordinates)),
        Geometry::MultiLineString { coordinates } => GeoGeometry::MultiLineString(
            geo::MultiLineString::new(coordinates.iter().map(|l| line(l)).collect()),
        ),
        Geometry::Polygon { coordinates } => GeoGeometry::Polygon(polygon(coordinates)),
        Geometry::MultiPolygon { coordinates } => GeoGeometry::MultiPolygon(
            geo::MultiPolygon::new(coordinates.iter().map(|p| polygon(p)).collect()),
        ),
    }
}

/// Convert a canonical Geometry to a geojson geometry value
pub fn to_geojson_value(geom: &Geometry) -> geojson::Value {
    let position = |p: &Position| p.to_vec();
    let positions = |ps: &Vec<Position>| ps.iter().map(position).collect::<Vec<_>>();
    let rings = |rs: &Vec<Vec<Position>>| rs.iter().map(positions).collect::<Vec<_>>();

    match geom {
        Geometry::Point { coordinates } => geojson::Value::Point(position(coordinates)),
        Geometry::MultiPoint { coordinates } => geojson::Value::MultiPoint(positions(coordinates)),
        Geometry::LineString { coordinates } => geojson::Value::LineString(positions(coordinates)),
        Geometry::MultiLineString { coordinates } => {
            geojson::Value::MultiLineString(rings(coordinates))
        }
        Geometry::Polygon { coordinates } => geojson::Value::Polygon(rings(coordinates)),
        Geometry::MultiPolygon { coordinates } => {
            geojson::Value::MultiPolygon(coordinates.iter().map(rings).collect())
        }
    }
}

/// Bounding box covering every geometry, `None` when there is nothing to cover
pub fn extent<'a>(geometries: impl IntoIterator<Item = &'a Geometry>) -> Option<Bounds> {
    let collection = geo::GeometryCollection(geometries.into_iter().map(to_geo_geometry).collect());
    let rect = collection.bounding_rect()?;
    Some(Bounds::new(rect.min().y, rect.min().x, rect.max().y, rect.max().x))
}

/// Extension trait for Geometry with geojson conversions
pub trait GeometryExt {
    /// Convert to a geojson::Geometry
    fn to_geojson_geometry(&self) -> geojson::Geometry;
}

impl GeometryExt for Geometry {
    fn to_geojson_geometry(&self) -> geojson::Geometry {
        geojson::Geometry::new(to_geojson_value(self))
    }
}
