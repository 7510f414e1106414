//! Tour, view, and registry configuration blocks as authored.
//!
//! Bounding boxes stay as raw JSON maps here: whether a box is usable is
//! decided by `tourmap_geo::bounds::validate_bounds`, not by deserialization.

use serde::{Deserialize, Serialize};

use super::style::{Attribution, IconOptions, PathOptions};

/// Starting-viewport inputs shared by tours and views (`start` block)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartOptions {
    /// Explicit `{south, west, north, east}` map
    pub bounds: Option<serde_json::Value>,
    /// Id of a feature whose Point coordinates center the viewport
    pub location: Option<String>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    /// Radius in degrees around the center
    pub distance: Option<f64>,
}

/// Per-feature override entry in a tour's `features` list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourFeatureEntry {
    pub id: String,
    #[serde(alias = "popupContent")]
    pub popup_content: Option<String>,
    #[serde(alias = "removePopup")]
    pub remove_popup: bool,
    #[serde(alias = "customName")]
    pub custom_name: Option<String>,
}

impl TourFeatureEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }
}

/// Per-dataset override block in a tour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourDatasetConfig {
    /// Dataset id (the dataset's file-like key)
    #[serde(alias = "file")]
    pub id: String,
    pub show_all: bool,
    pub icon: IconOptions,
    pub svg: PathOptions,
    pub svg_active: PathOptions,
    pub legend_text: Option<String>,
    pub legend_alt: Option<String>,
    pub icon_alt: Option<String>,
}

impl TourDatasetConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }
}

/// Tile server choice, either a named provider or an explicit URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileServerSelection {
    /// Name of an entry in the tile provider registry
    pub select: Option<String>,
    /// Explicit URL template
    pub url: Option<String>,
    /// Credits for an explicit URL
    pub attribution: Vec<Attribution>,
}

/// Named tile provider registry entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileProvider {
    pub url: String,
    pub attribution: Vec<Attribution>,
}

/// Basemap image registry entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasemapInfo {
    /// Registry key; filled from the table name when loaded from a registry
    pub file: String,
    pub url: Option<String>,
    /// Raw `{south, west, north, east}` map
    pub bounds: Option<serde_json::Value>,
    pub min_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub attribution: Vec<Attribution>,
}

/// A named restriction/override of a tour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub id: String,
    pub title: Option<String>,
    pub basemaps: Vec<String>,
    pub no_tour_basemaps: bool,
    pub features: Vec<String>,
    pub only_show_view_features: bool,
    pub remove_tile_server: bool,
    pub start: StartOptions,
}

/// A complete tour as authored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub id: String,
    pub title: Option<String>,
    pub datasets: Vec<TourDatasetConfig>,
    pub features: Vec<TourFeatureEntry>,
    pub basemaps: Vec<String>,
    pub tile_server: TileServerSelection,
    pub attribution: Vec<Attribution>,
    pub start: StartOptions,
    pub max_bounds: Option<serde_json::Value>,
    pub min_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub views: Vec<ViewConfig>,
}
