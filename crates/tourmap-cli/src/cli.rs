use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tourmap_core::config::parse_zoom;

/// tourmap - Map tour configuration resolver
#[derive(Parser, Debug)]
#[command(name = "tourmap")]
#[command(about = "Resolve map tours into render-ready specifications", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a tour into its render specification
    Render(RenderArgs),

    /// Check a dataset file and report what survives validation
    Validate(ValidateArgs),

    /// Show configuration and registries
    Inspect(InspectArgs),

    /// Compute bounds around a center point
    #[command(allow_negative_numbers = true)]
    Bounds(BoundsArgs),
}

/// Global configuration overrides shared by commands that read configuration
#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// Global configuration file (defaults to ./tourmap.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Named tile provider to use when a tour does not choose one
    #[arg(long)]
    pub tile_server: Option<String>,

    /// Tile URL template used when neither the tour nor the global configuration names a provider
    #[arg(long)]
    pub tile_url: Option<String>,

    /// Default minimum zoom level
    #[arg(long, value_parser = zoom_level)]
    pub min_zoom: Option<u8>,

    /// Default maximum zoom level
    #[arg(long, value_parser = zoom_level)]
    pub max_zoom: Option<u8>,

    /// Directory prefix for icon files
    #[arg(long)]
    pub icon_dir: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Tour file (TOML or JSON)
    pub tour: PathBuf,

    /// Directory holding dataset files (*.json, *.geojson)
    #[arg(long, default_value = ".")]
    pub datasets: PathBuf,

    /// Write the render specification to this file instead of stdout
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Dataset file (GeoJSON FeatureCollection)
    pub path: PathBuf,

    /// Name property to resolve feature names with
    #[arg(long)]
    pub name_property: Option<String>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    #[command(subcommand)]
    pub target: InspectTarget,
}

#[derive(Subcommand, Debug)]
pub enum InspectTarget {
    /// Show layered configuration values and their sources
    Config(ConfigArgs),

    /// List the basemap registry
    Basemaps(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct BoundsArgs {
    /// Center latitude
    pub lat: f64,

    /// Center longitude
    pub long: f64,

    /// Radius in degrees
    pub radius: f64,
}

fn zoom_level(s: &str) -> Result<u8, String> {
    parse_zoom(s).map_err(|e| e.to_string())
}
