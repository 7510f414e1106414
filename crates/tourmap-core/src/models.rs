pub mod bounds;
pub mod geometry;
pub mod style;
pub mod tour;

pub use bounds::Bounds;
pub use geometry::{Geometry, GeometryType, Position};
pub use style::{Attribution, IconOptions, PathOptions};
pub use tour::{
    BasemapInfo, StartOptions, TileProvider, TileServerSelection, TourConfig, TourDatasetConfig,
    TourFeatureEntry, ViewConfig,
};
