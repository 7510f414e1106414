//! Integration tests for the tourmap binary
//!
//! These tests run the built executable and check its JSON output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

const ENV_VARS: [&str; 5] = [
    "TOURMAP_TILE_SERVER",
    "TOURMAP_TILE_URL",
    "TOURMAP_MIN_ZOOM",
    "TOURMAP_MAX_ZOOM",
    "TOURMAP_ICON_DIR",
];

fn tourmap(dir: &Path, args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tourmap"));
    command.current_dir(dir).args(args).env("RUST_LOG", "warn");
    for key in ENV_VARS {
        command.env_remove(key);
    }
    command.output().expect("Failed to execute command")
}

fn json_stdout(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn write_fixture(dir: &Path) {
    let datasets = dir.join("datasets");
    fs::create_dir_all(&datasets).unwrap();
    fs::write(
        datasets.join("ports.json"),
        r#"{
            "type": "FeatureCollection",
            "name_property": "title",
            "legend_text": "Ports",
            "features": [
                { "type": "Feature", "id": "genoa",
                  "geometry": { "type": "Point", "coordinates": [8.93, 44.41] },
                  "properties": { "title": "Genoa" },
                  "popup_content": "Republic of Genoa" },
                { "type": "Feature", "id": "venice",
                  "geometry": { "type": "Point", "coordinates": [12.33, 45.44] },
                  "properties": { "title": "Venice" } },
                { "type": "Feature", "id": "nowhere",
                  "geometry": { "type": "Point", "coordinates": [999, 0] } }
            ]
        }"#,
    )
    .unwrap();

    fs::write(
        dir.join("tourmap.toml"),
        r#"
min_zoom = 4

[basemaps."1850.png"]
bounds = { south = 43.0, west = 8.0, north = 46.0, east = 13.0 }
"#,
    )
    .unwrap();

    fs::write(
        dir.join("merchants.toml"),
        r#"
title = "Merchant republics"
basemaps = ["1850.png", "missing.png"]

[[datasets]]
file = "ports.json"

[[features]]
id = "genoa"

[start]
location = "venice"
distance = 1.0
"#,
    )
    .unwrap();
}

#[test]
fn test_bounds_json_output() {
    let dir = TempDir::new().unwrap();
    let output = tourmap(dir.path(), &["--json", "bounds", "10", "170", "20"]);
    assert!(output.status.success(), "Command should succeed");

    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");
    let data = &parsed["data"];
    assert_eq!(data["south"].as_f64(), Some(-10.0));
    assert_eq!(data["west"].as_f64(), Some(150.0));
    assert_eq!(data["north"].as_f64(), Some(30.0));
    assert_eq!(data["east"].as_f64(), Some(-170.0));
}

#[test]
fn test_bounds_rejects_bad_radius() {
    let dir = TempDir::new().unwrap();
    let output = tourmap(dir.path(), &["bounds", "10", "-20", "0"]);
    assert!(!output.status.success(), "Zero radius should fail");
}

#[test]
fn test_validate_reports_dropped_records() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let output = tourmap(dir.path(), &["--json", "validate", "datasets/ports.json"]);
    assert!(output.status.success(), "Command should succeed");

    let data = json_stdout(&output)["data"].clone();
    assert_eq!(data["records"], 3);
    assert_eq!(data["valid"], 2);
    assert_eq!(data["dropped"], 1);
    assert_eq!(data["geometry_type"], "Point");
    assert_eq!(data["name_property"], "title");
    assert_eq!(data["properties"], serde_json::json!(["title"]));
    assert_eq!(data["features"][0]["name"], "Genoa");
    assert_eq!(data["features"][0]["has_popup"], true);
}

#[test]
fn test_render_uses_global_tile_url() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let args = [
        "--json",
        "render",
        "merchants.toml",
        "--datasets",
        "datasets",
        "--tile-url",
        "https://tiles.example/{z}/{x}/{y}.png",
    ];
    let output = tourmap(dir.path(), &args);
    assert!(output.status.success(), "Command should succeed");

    let server = json_stdout(&output)["data"]["options"]["tileServer"].clone();
    assert_eq!(server["url"], "https://tiles.example/{z}/{x}/{y}.png");
    assert!(server.get("name").is_none());
}

#[test]
fn test_render_to_stdout() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let output =
        tourmap(dir.path(), &["--json", "render", "merchants.toml", "--datasets", "datasets"]);
    assert!(output.status.success(), "Command should succeed");

    let spec = json_stdout(&output)["data"].clone();
    assert_eq!(spec["id"], "merchants");
    assert!(spec["features"].get("genoa").is_some());
    assert!(spec["features"].get("venice").is_none());
    assert_eq!(spec["popups"]["genoa"]["content"], "Republic of Genoa");
    assert!(spec["basemaps"].get("1850.png").is_some());
    assert_eq!(spec["options"]["minZoom"], 4);
    assert!(spec["options"]["bounds"].is_array());

    // The unknown basemap is reported on stderr, not in the JSON
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing.png"));
}

#[test]
fn test_render_to_file_with_cli_override() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let output = tourmap(
        dir.path(),
        &[
            "--json",
            "render",
            "merchants.toml",
            "--datasets",
            "datasets",
            "--out",
            "spec.json",
            "--min-zoom",
            "6",
        ],
    );
    assert!(output.status.success(), "Command should succeed");

    let summary = json_stdout(&output)["data"].clone();
    assert_eq!(summary["feature_count"], 1);
    assert_eq!(summary["skipped"].as_array().map(Vec::len), Some(1));

    let content = fs::read_to_string(dir.path().join("spec.json")).unwrap();
    let written: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(written["options"]["minZoom"], 6);
}

#[test]
fn test_inspect_config_sources() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());

    let output = tourmap(dir.path(), &["--json", "inspect", "config", "--icon-dir", "img"]);
    assert!(output.status.success(), "Command should succeed");

    let data = json_stdout(&output)["data"].clone();
    assert_eq!(data["min_zoom"]["value"], "4");
    assert_eq!(data["min_zoom"]["source"], "File");
    assert_eq!(data["icon_dir"]["value"], "img");
    assert_eq!(data["icon_dir"]["source"], "Cli");
    assert_eq!(data["max_zoom"]["source"], "Default");
}
