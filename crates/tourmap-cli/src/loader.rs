//! Dataset and tour file loading.
//!
//! A dataset file is a GeoJSON FeatureCollection whose foreign members carry
//! the dataset defaults (`name`, `name_property`, `icon`, `svg`, ...). Its file
//! name is the dataset id that tours refer to.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tourmap_core::models::TourConfig;
use tourmap_core::{Result, TourmapError};
use tourmap_engine::{Dataset, DatasetSettings, FeatureUpdate};

const DATASET_EXTENSIONS: [&str; 2] = ["json", "geojson"];

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    features: Vec<Value>,
    /// Dataset-level feature edits applied after the records are read
    #[serde(default)]
    updates: Vec<FeatureUpdate>,
    #[serde(flatten)]
    settings: DatasetSettings,
}

/// A dataset together with how many raw records it was built from
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub records: usize,
}

/// Load one dataset file
pub fn load_dataset(path: &Path) -> Result<LoadedDataset> {
    let id = file_name(path)?;
    let content = fs::read_to_string(path)?;
    let file: DatasetFile =
        serde_json::from_str(&content).map_err(|e| invalid(path, e.to_string()))?;

    if !file.kind.eq_ignore_ascii_case("FeatureCollection") {
        return Err(invalid(path, format!("expected a FeatureCollection, found '{}'", file.kind)));
    }

    let mut dataset = Dataset::from_records(id, file.settings, &file.features);
    if !file.updates.is_empty() {
        dataset.apply_feature_updates(&file.updates);
    }
    Ok(LoadedDataset { dataset, records: file.features.len() })
}

/// Load every dataset file in a directory, keyed by file name.
///
/// Files that cannot be read as datasets are skipped with a warning.
pub fn load_dataset_dir(dir: &Path) -> Result<BTreeMap<String, Dataset>> {
    if !dir.is_dir() {
        return Err(TourmapError::DatasetNotFound { id: dir.display().to_string() });
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_dataset_file(path))
        .collect();
    paths.sort();

    let mut datasets = BTreeMap::new();
    for path in paths {
        match load_dataset(&path) {
            Ok(loaded) => {
                datasets.insert(loaded.dataset.id().to_string(), loaded.dataset);
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "Skipping dataset file"),
        }
    }
    tracing::debug!(count = datasets.len(), dir = %dir.display(), "Loaded datasets");
    Ok(datasets)
}

/// Load a tour from TOML, or JSON when the extension says so.
///
/// A tour without an id takes its file stem.
pub fn load_tour(path: &Path) -> Result<TourConfig> {
    let content = fs::read_to_string(path)?;
    let mut tour: TourConfig = if has_extension(path, "json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content).map_err(|e| TourmapError::ConfigInvalid {
            key: path.display().to_string(),
            reason: format!("Failed to parse TOML: {}", e),
        })?
    };

    if tour.id.trim().is_empty() {
        tour.id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(tour)
}

fn is_dataset_file(path: &Path) -> bool {
    DATASET_EXTENSIONS.iter().any(|ext| has_extension(path, ext))
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| invalid(path, "path has no file name".to_string()))
}

fn invalid(path: &Path, reason: String) -> TourmapError {
    TourmapError::InvalidRecordSource { path: path.to_path_buf(), reason }
}
