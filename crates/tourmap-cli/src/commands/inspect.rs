//! Inspect command implementation

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use tourmap_core::config::{ConfigSource, LayeredConfig};
use tourmap_geo::validate_bounds;

use crate::cli::{ConfigArgs, InspectArgs, InspectTarget};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigValue, InspectConfigOutput};

pub fn execute(args: InspectArgs, output: &OutputWriter) -> Result<()> {
    match args.target {
        InspectTarget::Config(config) => inspect_config(&config, output),
        InspectTarget::Basemaps(config) => inspect_basemaps(&config, output),
    }
}

/// Inspect layered configuration with sources
fn inspect_config(args: &ConfigArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config(args)?;
    let inspection_map = config.to_inspection_map();

    if output.is_json() {
        let entry = |key: &str| {
            let (value, source) = inspection_map
                .get(key)
                .map(|(value, source)| (value.clone(), *source))
                .unwrap_or_else(|| ("(none)".to_string(), ConfigSource::Default));
            ConfigValue { value, source: format!("{:?}", source) }
        };

        return output.result(InspectConfigOutput {
            tile_server: entry("tile_server"),
            tile_server_url: entry("tile_server_url"),
            min_zoom: entry("min_zoom"),
            max_zoom: entry("max_zoom"),
            icon_dir: entry("icon_dir"),
        });
    }

    output.section("Configuration Values");

    #[derive(Tabled, Serialize)]
    struct ConfigRow {
        #[tabled(rename = "Key")]
        key: String,
        #[tabled(rename = "Value")]
        value: String,
        #[tabled(rename = "Source")]
        source: String,
    }

    let mut rows: Vec<ConfigRow> = inspection_map
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();

    // Sort by key for consistent output
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    output.table(rows)?;

    output.section("Tile Providers");
    output.info(provider_names(&config));

    output.section("Configuration Precedence");
    output.info("CLI arguments > Environment variables > Config file > Defaults");

    Ok(())
}

/// List the basemap registry with bounds status
fn inspect_basemaps(args: &ConfigArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config(args)?;

    #[derive(Tabled, Serialize)]
    struct BasemapRow {
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "URL")]
        url: String,
        #[tabled(rename = "Bounds")]
        bounds: String,
        #[tabled(rename = "Zoom")]
        zoom: String,
    }

    let rows: Vec<BasemapRow> = config
        .basemap_registry()
        .values()
        .map(|info| BasemapRow {
            file: info.file.clone(),
            url: info.url.clone().unwrap_or_else(|| info.file.clone()),
            bounds: match info.bounds.as_ref().and_then(validate_bounds) {
                Some(b) => format!("[{}, {}] - [{}, {}]", b.south, b.west, b.north, b.east),
                None => "invalid".to_string(),
            },
            zoom: format!(
                "{}-{}",
                info.min_zoom.map_or("*".to_string(), |z| z.to_string()),
                info.max_zoom.map_or("*".to_string(), |z| z.to_string())
            ),
        })
        .collect();

    if !output.is_json() {
        output.section("Basemaps");
    }
    output.table(rows)
}

fn provider_names(config: &LayeredConfig) -> String {
    config.tile_providers.keys().cloned().collect::<Vec<_>>().join(", ")
}
