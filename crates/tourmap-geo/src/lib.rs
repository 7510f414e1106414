//! Tourmap Geo - Coordinate validation and bounding-box arithmetic
//!
//! This crate checks every coordinate tree and bounding box before it reaches
//! the renderer. Nothing here fails hard: invalid input yields `None`.

pub mod bounds;
pub mod models;
pub mod validation;

pub use bounds::{bounds_from_center_and_radius, shift_latitude, shift_longitude, validate_bounds};
pub use validation::{validate_geometry, validate_point};
