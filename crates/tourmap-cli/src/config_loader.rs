//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tourmap_core::config::{CliConfigOverrides, LayeredConfig};

use crate::cli::ConfigArgs;

/// File picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "tourmap.toml";

/// Load layered configuration: defaults, file, environment, then CLI flags
pub fn load_config(args: &ConfigArgs) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = config_path(args.config.as_deref()) {
        config = config
            .load_from_file(&path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?;
    }

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        tile_server: args.tile_server.clone(),
        tile_server_url: args.tile_url.clone(),
        min_zoom: args.min_zoom,
        max_zoom: args.max_zoom,
        icon_dir: args.icon_dir.clone(),
    });
    Ok(config)
}

/// An explicit path always counts; the default file only when it exists
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.is_file().then_some(default)
        }
    }
}
