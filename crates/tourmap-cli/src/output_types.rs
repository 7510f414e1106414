use serde::Serialize;
use tourmap_core::models::GeometryType;

/// Output for render command when the spec is written to a file
#[derive(Debug, Serialize)]
pub struct RenderOutput {
    pub tour: String,
    pub out: String,
    pub feature_count: usize,
    pub dataset_count: usize,
    pub basemap_count: usize,
    pub view_count: usize,
    pub skipped: Vec<String>,
}

/// Output for validate command
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub dataset: String,
    pub display_name: String,
    pub geometry_type: GeometryType,
    pub records: usize,
    pub valid: usize,
    pub dropped: usize,
    pub name_property: Option<String>,
    /// Property keys a name can be taken from
    pub properties: Vec<String>,
    /// `[[south, west], [north, east]]`
    pub extent: Option<[[f64; 2]; 2]>,
    pub features: Vec<FeatureSummary>,
}

#[derive(Debug, Serialize)]
pub struct FeatureSummary {
    pub id: String,
    pub name: String,
    pub has_popup: bool,
    pub hidden: bool,
}

/// Output for inspect config command
#[derive(Debug, Serialize)]
pub struct InspectConfigOutput {
    pub tile_server: ConfigValue,
    pub tile_server_url: ConfigValue,
    pub min_zoom: ConfigValue,
    pub max_zoom: ConfigValue,
    pub icon_dir: ConfigValue,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue {
    pub value: String,
    pub source: String,
}

/// Output for bounds command
#[derive(Debug, Serialize)]
pub struct BoundsOutput {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}
