use serde::{Deserialize, Serialize};

/// A south/west/north/east rectangle in degrees.
///
/// Constructing one directly performs no range checks; `tourmap_geo::bounds`
/// is the only producer of validated values. South/north and west/east are
/// never reordered, so a "backwards" box survives untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self { south, west, north, east }
    }

    /// Leaflet-style corner pair `[[south, west], [north, east]]`
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }
}
