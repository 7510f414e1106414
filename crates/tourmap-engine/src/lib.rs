//! Tour configuration resolution.
//!
//! Builds datasets from raw records, merges them against tour overrides and
//! assembles the render specification, including views.

pub mod attribution;
pub mod dataset;
pub mod diagnostics;
pub mod feature;
pub mod merge;
pub mod output;
pub mod tour;
mod view;
mod viewport;

pub use dataset::{Dataset, DatasetSettings};
pub use diagnostics::{Diagnostic, Scope};
pub use feature::{DatasetFeatureFields, Feature, FeatureUpdate};
pub use merge::{LegendEntry, MergedDatasetView, ResolvedIcon, ResolvedPath, ShownFeature};
pub use output::{
    Assembly, BasemapSpec, DatasetStyle, Popup, RenderSpec, TileServer, TourOptions, ViewSpec,
};
pub use tour::TourAssembler;
