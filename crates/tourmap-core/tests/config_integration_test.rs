//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use tourmap_core::config::{parse_zoom, CliConfigOverrides, ConfigSource, LayeredConfig};
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn clear_env() {
    for key in [
        "TOURMAP_TILE_SERVER",
        "TOURMAP_TILE_URL",
        "TOURMAP_MIN_ZOOM",
        "TOURMAP_MAX_ZOOM",
        "TOURMAP_ICON_DIR",
    ] {
        env::remove_var(key);
    }
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
max_zoom = 14
# Only override max_zoom, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap();

    assert_eq!(config.max_zoom.value, 14);
    assert_eq!(config.max_zoom.source, ConfigSource::File);
    assert_eq!(config.min_zoom.value, 8);
    assert_eq!(config.min_zoom.source, ConfigSource::Default);
    assert_eq!(config.icon_dir.source, ConfigSource::Default);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();

    env::set_var("TOURMAP_MIN_ZOOM", "5");
    env::set_var("TOURMAP_TILE_SERVER", "topo");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
min_zoom = 3
tile_server = "file-provider"
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.min_zoom.value, 5);
    assert_eq!(config.min_zoom.source, ConfigSource::Environment);
    assert_eq!(config.tile_server.value.as_deref(), Some("topo"));
    assert_eq!(config.tile_server.source, ConfigSource::Environment);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_environment_value_is_ignored() {
    clear_env();
    env::set_var("TOURMAP_MAX_ZOOM", "ninety");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.max_zoom.value, 16);
    assert_eq!(config.max_zoom.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_all() {
    clear_env();
    env::set_var("TOURMAP_ICON_DIR", "env/icons");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "icon_dir = \"file/icons\"").unwrap();

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    assert_eq!(config.icon_dir.value, "env/icons");

    config.update_from_cli(CliConfigOverrides {
        icon_dir: Some("cli/icons".to_string()),
        ..Default::default()
    });

    assert_eq!(config.icon_dir.value, "cli/icons");
    assert_eq!(config.icon_dir.source, ConfigSource::Cli);

    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());

    clear_env();
}

#[test]
fn test_registries_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("tourmap.toml");
    fs::write(
        &config_path,
        r#"
[[attribution]]
text = "Historic Society"
url = "https://history.example.org"

[basemaps."1850.png"]
url = "basemaps/1850.png"
bounds = { south = 20.0, west = -110.0, north = 30.0, east = -100.0 }
attribution = [{ text = "State Archive" }]
"#,
    )
    .unwrap();

    let config = LayeredConfig::with_defaults()
        .load_from_file(&config_path)
        .unwrap();

    let defaults = config.global_defaults();
    assert_eq!(defaults.attribution[0].text, "Historic Society");

    let basemap = &config.basemap_registry()["1850.png"];
    assert_eq!(basemap.url.as_deref(), Some("basemaps/1850.png"));
    assert_eq!(basemap.attribution[0].text, "State Archive");
    assert!(basemap.bounds.is_some());
}

#[test]
fn test_parse_zoom_variations() {
    assert_eq!(parse_zoom("28").unwrap(), 28);
    assert!(parse_zoom("").is_err());
    assert!(parse_zoom("3.5").is_err());
}

#[test]
fn test_invalid_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid toml content [[[").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());

    assert!(result.is_err());
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let non_existent = temp_dir.path().join("does_not_exist.toml");

    let result = LayeredConfig::with_defaults().load_from_file(&non_existent);

    assert!(result.is_err());
}
