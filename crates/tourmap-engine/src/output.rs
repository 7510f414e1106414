//! Render specification types produced by tour assembly

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tourmap_core::models::{Attribution, Bounds, GeometryType};

use crate::diagnostics::Diagnostic;
use crate::merge::{LegendEntry, ResolvedIcon, ResolvedPath};

/// Everything the map renderer needs for one tour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSpec {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// GeoJSON Feature records keyed by feature id
    pub features: BTreeMap<String, geojson::Feature>,
    pub datasets: BTreeMap<String, DatasetStyle>,
    pub basemaps: BTreeMap<String, BasemapSpec>,
    pub legend: Vec<LegendEntry>,
    pub popups: BTreeMap<String, Popup>,
    pub views: BTreeMap<String, ViewSpec>,
    pub options: TourOptions,
}

/// Resolved symbol styling for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    pub feature_type: GeometryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ResolvedIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ResolvedPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_path: Option<ResolvedPath>,
}

/// Image overlay with validated bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasemapSpec {
    pub url: String,
    #[serde(serialize_with = "corners")]
    pub bounds: Bounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popup {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileServer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
}

/// A view resolved against the assembled tour
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub basemaps: Vec<String>,
    pub features: Vec<String>,
    pub only_show_view_features: bool,
    pub no_tour_basemaps: bool,
    pub remove_tile_server: bool,
    #[serde(serialize_with = "optional_corners", skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

/// Map-wide options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourOptions {
    pub min_zoom: u8,
    pub max_zoom: u8,
    #[serde(serialize_with = "optional_corners", skip_serializing_if = "Option::is_none")]
    pub max_bounds: Option<Bounds>,
    /// Starting viewport
    #[serde(serialize_with = "optional_corners", skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_server: Option<TileServer>,
    pub attribution: Vec<Attribution>,
}

/// Result of assembling a tour: always a spec, plus what was skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub spec: RenderSpec,
    pub diagnostics: Vec<Diagnostic>,
}

fn corners<S: Serializer>(bounds: &Bounds, serializer: S) -> Result<S::Ok, S::Error> {
    bounds.corners().serialize(serializer)
}

fn optional_corners<S: Serializer>(
    bounds: &Option<Bounds>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    bounds.map(|b| b.corners()).serialize(serializer)
}
