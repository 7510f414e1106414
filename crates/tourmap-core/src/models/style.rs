//! Author-editable style blocks.
//!
//! The same block types are used at the dataset level (defaults) and at the
//! tour level (overrides). Every field is optional; unknown keys are ignored
//! when deserializing so that one stray entry never invalidates a block.

use serde::{Deserialize, Serialize};

/// Marker icon settings (`icon` block)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconOptions {
    /// Icon image file, relative to the configured icon directory
    pub file: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub anchor_x: Option<f64>,
    pub anchor_y: Option<f64>,
    pub tooltip_anchor_x: Option<f64>,
    pub tooltip_anchor_y: Option<f64>,
    /// Shadow image file, relative to the configured icon directory
    pub shadow: Option<String>,
    pub shadow_width: Option<f64>,
    pub shadow_height: Option<f64>,
    pub shadow_anchor_x: Option<f64>,
    pub shadow_anchor_y: Option<f64>,
    /// Extra CSS class appended to the marker class
    pub class: Option<String>,
    /// High-DPI variant of `file`
    pub retina: Option<String>,
    /// Ignore the dataset's icon block entirely (only meaningful on tour overrides)
    pub use_defaults: bool,
}

/// Path style settings (`svg` and `svg_active` blocks)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    pub stroke: Option<bool>,
    pub color: Option<String>,
    pub weight: Option<f64>,
    pub opacity: Option<f64>,
    pub fill: Option<bool>,
    #[serde(alias = "fillColor")]
    pub fill_color: Option<String>,
    #[serde(alias = "fillOpacity")]
    pub fill_opacity: Option<f64>,
}

/// Credit line shown on the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Attribution {
    pub fn new(text: impl Into<String>, url: Option<&str>) -> Self {
        Self { text: text.into(), url: url.map(str::to_string) }
    }
}
