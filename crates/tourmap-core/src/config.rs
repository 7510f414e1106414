use crate::error::{Result, TourmapError};
use crate::models::{Attribution, BasemapInfo, TileProvider, TileServerSelection};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::fs;
use std::path::Path;

/// Highest zoom level accepted from configuration
pub const MAX_ZOOM_LEVEL: u8 = 28;

/// Name of the built-in tile provider, used when no layer picks a tile server
pub const DEFAULT_TILE_PROVIDER: &str = "openstreetmap";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Site-wide fallbacks handed to tour assembly.
///
/// Everything a tour does not override resolves against these values.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalDefaults {
    pub tile_server: TileServerSelection,
    pub tile_providers: BTreeMap<String, TileProvider>,
    pub attribution: Vec<Attribution>,
    pub min_zoom: u8,
    pub max_zoom: u8,
    /// Directory prefix for icon and shadow image files
    pub icon_dir: String,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        LayeredConfig::with_defaults().global_defaults()
    }
}

/// Layered configuration for tourmap
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub tile_server: ConfigValue<Option<String>>,
    pub tile_server_url: ConfigValue<Option<String>>,
    pub min_zoom: ConfigValue<u8>,
    pub max_zoom: ConfigValue<u8>,
    pub icon_dir: ConfigValue<String>,
    /// File-only sections
    pub attribution: Vec<Attribution>,
    pub tile_server_attribution: Vec<Attribution>,
    pub tile_providers: BTreeMap<String, TileProvider>,
    pub basemaps: BTreeMap<String, BasemapInfo>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        let mut tile_providers = BTreeMap::new();
        tile_providers.insert(
            DEFAULT_TILE_PROVIDER.to_string(),
            TileProvider {
                url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
                attribution: vec![Attribution::new(
                    "OpenStreetMap contributors",
                    Some("https://www.openstreetmap.org/copyright"),
                )],
            },
        );

        Self {
            tile_server: ConfigValue::new(None, ConfigSource::Default),
            tile_server_url: ConfigValue::new(None, ConfigSource::Default),
            min_zoom: ConfigValue::new(8, ConfigSource::Default),
            max_zoom: ConfigValue::new(16, ConfigSource::Default),
            icon_dir: ConfigValue::new("assets/icons".to_string(), ConfigSource::Default),
            attribution: Vec::new(),
            tile_server_attribution: Vec::new(),
            tile_providers,
            basemaps: BTreeMap::new(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| TourmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| TourmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(tile_server) = file_config.tile_server {
            self.tile_server.update(Some(tile_server), ConfigSource::File);
        }

        if let Some(url) = file_config.tile_server_url {
            self.tile_server_url.update(Some(url), ConfigSource::File);
        }

        if let Some(min_zoom) = file_config.min_zoom {
            self.min_zoom.update(check_zoom("min_zoom", min_zoom)?, ConfigSource::File);
        }

        if let Some(max_zoom) = file_config.max_zoom {
            self.max_zoom.update(check_zoom("max_zoom", max_zoom)?, ConfigSource::File);
        }

        if let Some(icon_dir) = file_config.icon_dir {
            self.icon_dir.update(icon_dir, ConfigSource::File);
        }

        self.attribution.extend(file_config.attribution);
        self.tile_server_attribution.extend(file_config.tile_server_attribution);
        self.tile_providers.extend(file_config.tile_servers);
        for (file, mut basemap) in file_config.basemaps {
            basemap.file = file.clone();
            self.basemaps.insert(file, basemap);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // TOURMAP_TILE_SERVER
        if let Ok(name) = env::var("TOURMAP_TILE_SERVER") {
            self.tile_server.update(Some(name), ConfigSource::Environment);
        }

        // TOURMAP_TILE_URL
        if let Ok(url) = env::var("TOURMAP_TILE_URL") {
            self.tile_server_url.update(Some(url), ConfigSource::Environment);
        }

        // TOURMAP_MIN_ZOOM
        if let Ok(zoom_str) = env::var("TOURMAP_MIN_ZOOM") {
            match parse_zoom(&zoom_str) {
                Ok(zoom) => self.min_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TOURMAP_MIN_ZOOM value '{}': expected integer 0-{}",
                    zoom_str,
                    MAX_ZOOM_LEVEL
                ),
            }
        }

        // TOURMAP_MAX_ZOOM
        if let Ok(zoom_str) = env::var("TOURMAP_MAX_ZOOM") {
            match parse_zoom(&zoom_str) {
                Ok(zoom) => self.max_zoom.update(zoom, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid TOURMAP_MAX_ZOOM value '{}': expected integer 0-{}",
                    zoom_str,
                    MAX_ZOOM_LEVEL
                ),
            }
        }

        // TOURMAP_ICON_DIR
        if let Ok(icon_dir) = env::var("TOURMAP_ICON_DIR") {
            self.icon_dir.update(icon_dir, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(tile_server) = overrides.tile_server {
            self.tile_server.update(Some(tile_server), ConfigSource::Cli);
        }

        if let Some(url) = overrides.tile_server_url {
            self.tile_server_url.update(Some(url), ConfigSource::Cli);
        }

        if let Some(min_zoom) = overrides.min_zoom {
            self.min_zoom.update(min_zoom, ConfigSource::Cli);
        }

        if let Some(max_zoom) = overrides.max_zoom {
            self.max_zoom.update(max_zoom, ConfigSource::Cli);
        }

        if let Some(icon_dir) = overrides.icon_dir {
            self.icon_dir.update(icon_dir, ConfigSource::Cli);
        }
    }

    /// Collapse the layers into the fallbacks used by tour assembly
    pub fn global_defaults(&self) -> GlobalDefaults {
        GlobalDefaults {
            tile_server: TileServerSelection {
                select: self.tile_server.value.clone(),
                url: self.tile_server_url.value.clone(),
                attribution: self.tile_server_attribution.clone(),
            },
            tile_providers: self.tile_providers.clone(),
            attribution: self.attribution.clone(),
            min_zoom: self.min_zoom.value,
            max_zoom: self.max_zoom.value,
            icon_dir: self.icon_dir.value.clone(),
        }
    }

    /// The basemap registry, keyed by file
    pub fn basemap_registry(&self) -> &BTreeMap<String, BasemapInfo> {
        &self.basemaps
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "tile_server".to_string(),
            (
                self.tile_server.value.clone().unwrap_or_else(|| "(none)".to_string()),
                self.tile_server.source,
            ),
        );

        map.insert(
            "tile_server_url".to_string(),
            (
                self.tile_server_url.value.clone().unwrap_or_else(|| "(none)".to_string()),
                self.tile_server_url.source,
            ),
        );

        map.insert("min_zoom".to_string(), (self.min_zoom.value.to_string(), self.min_zoom.source));

        map.insert("max_zoom".to_string(), (self.max_zoom.value.to_string(), self.max_zoom.source));

        map.insert("icon_dir".to_string(), (self.icon_dir.value.clone(), self.icon_dir.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    tile_server: Option<String>,
    tile_server_url: Option<String>,
    min_zoom: Option<i64>,
    max_zoom: Option<i64>,
    icon_dir: Option<String>,
    #[serde(default)]
    attribution: Vec<Attribution>,
    #[serde(default)]
    tile_server_attribution: Vec<Attribution>,
    #[serde(default)]
    tile_servers: BTreeMap<String, TileProvider>,
    #[serde(default)]
    basemaps: BTreeMap<String, BasemapInfo>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub tile_server: Option<String>,
    pub tile_server_url: Option<String>,
    pub min_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub icon_dir: Option<String>,
}

/// Parse a zoom level from string
pub fn parse_zoom(s: &str) -> Result<u8> {
    let zoom = s.trim().parse::<i64>().map_err(|_| TourmapError::ConfigInvalid {
        key: "zoom".to_string(),
        reason: format!("Invalid zoom level: {}. Use an integer", s),
    })?;
    check_zoom("zoom", zoom)
}

fn check_zoom(key: &str, zoom: i64) -> Result<u8> {
    u8::try_from(zoom)
        .ok()
        .filter(|z| *z <= MAX_ZOOM_LEVEL)
        .ok_or_else(|| TourmapError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Zoom level {} is outside 0-{}", zoom, MAX_ZOOM_LEVEL),
        })
}
