//! Dataset merge against tour overrides.
//!
//! Every style key resolves tour override > dataset default > built-in
//! fallback. The merge reads the dataset and builds a fresh
//! [`MergedDatasetView`]; nothing is written back.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tourmap_core::layering::{first_present, first_present_or};
use tourmap_core::models::{
    Geometry, GeometryType, IconOptions, PathOptions, TourDatasetConfig, TourFeatureEntry,
};

use crate::dataset::Dataset;

pub const DEFAULT_MARKER_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon.png";
pub const DEFAULT_MARKER_RETINA_URL: &str =
    "https://unpkg.com/leaflet@1.9.4/dist/images/marker-icon-2x.png";
pub const DEFAULT_SHADOW_URL: &str =
    "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png";

const DEFAULT_MARKER_SIZE: [f64; 2] = [25.0, 41.0];
const DEFAULT_MARKER_ANCHOR: [f64; 2] = [12.0, 41.0];
const DEFAULT_TOOLTIP_ANCHOR: [f64; 2] = [16.0, -28.0];
const DEFAULT_SHADOW_SIZE: [f64; 2] = [41.0, 41.0];
const CUSTOM_ICON_SIZE: [f64; 2] = [14.0, 14.0];
const MARKER_CLASS: &str = "leaflet-marker";

const DEFAULT_PATH_COLOR: &str = "#3388ff";
const DEFAULT_PATH_WEIGHT: f64 = 3.0;
const DEFAULT_PATH_OPACITY: f64 = 1.0;
const DEFAULT_FILL_OPACITY: f64 = 0.2;
const ACTIVE_FILL_OPACITY: f64 = 0.4;

/// Marker icon ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIcon {
    pub icon_url: String,
    pub icon_size: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_anchor: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_anchor: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_retina_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_size: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_anchor: Option<[f64; 2]>,
    pub class_name: String,
}

/// Path style ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPath {
    pub stroke: bool,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub fill: bool,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Legend line for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub dataset: String,
    pub text: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ResolvedPath>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShownFeature {
    pub name: String,
    pub geometry: Geometry,
    pub popup_content: Option<String>,
}

/// One dataset resolved for one tour
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDatasetView {
    pub dataset_id: String,
    pub feature_type: GeometryType,
    pub icon: Option<ResolvedIcon>,
    pub path: Option<ResolvedPath>,
    pub active_path: Option<ResolvedPath>,
    pub legend: Option<LegendEntry>,
    pub shown: BTreeMap<String, ShownFeature>,
    pub hidden: BTreeMap<String, Geometry>,
}

impl Dataset {
    /// Resolve this dataset against one tour's override block and feature list
    pub fn merge_tour_data(
        &self,
        overrides: &TourDatasetConfig,
        entries: &[TourFeatureEntry],
        icon_dir: &str,
    ) -> MergedDatasetView {
        let (icon, path, active_path) = if self.feature_type().is_point() {
            (Some(resolve_icon(&overrides.icon, &self.icon, icon_dir)), None, None)
        } else {
            let path = resolve_path(&overrides.svg, &self.svg);
            let active = resolve_active_path(&overrides.svg_active, &self.svg_active, &path);
            (None, Some(path), Some(active))
        };

        let legend = resolve_legend(overrides, self).map(|mut entry| {
            entry.icon_url = icon.as_ref().map(|i| i.icon_url.clone());
            entry.path = path.clone();
            entry
        });

        let by_id: HashMap<&str, &TourFeatureEntry> =
            entries.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut shown = BTreeMap::new();
        let mut hidden = BTreeMap::new();
        for feature in self.features() {
            let entry = by_id.get(feature.id()).copied();
            if !overrides.show_all && entry.is_none() {
                hidden.insert(feature.id().to_string(), feature.geometry().clone());
                continue;
            }

            let name = first_present([
                entry.and_then(|e| e.custom_name.as_deref()),
                Some(feature.name()),
            ])
            .unwrap_or(feature.id());
            let tour_popup = entry
                .and_then(|e| e.popup_content.as_deref())
                .filter(|c| !c.trim().is_empty());
            let popup_content = match (tour_popup, entry.map(|e| e.remove_popup)) {
                (Some(content), _) => Some(content),
                (None, Some(true)) => None,
                _ => feature.popup_content(),
            };

            shown.insert(
                feature.id().to_string(),
                ShownFeature {
                    name: name.to_string(),
                    geometry: feature.geometry().clone(),
                    popup_content: popup_content.map(str::to_string),
                },
            );
        }

        MergedDatasetView {
            dataset_id: self.id().to_string(),
            feature_type: self.feature_type(),
            icon,
            path,
            active_path,
            legend,
            shown,
            hidden,
        }
    }
}

/// Resolve marker options.
///
/// `use_defaults` on the tour block drops the dataset layer entirely.
pub fn resolve_icon(tour: &IconOptions, dataset: &IconOptions, icon_dir: &str) -> ResolvedIcon {
    let layers: Vec<&IconOptions> =
        if tour.use_defaults { vec![tour] } else { vec![tour, dataset] };

    let file = first_present(layers.iter().map(|l| l.file.as_ref()));
    let default_marker = file.is_none();

    let number = |pick: fn(&IconOptions) -> Option<f64>| {
        layers.iter().filter_map(|l| pick(l)).find(|n| n.is_finite())
    };
    // Both halves from the same layer or nothing
    let pair = |pick: fn(&IconOptions) -> (Option<f64>, Option<f64>)| {
        layers.iter().find_map(|l| match pick(l) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some([x, y]),
            _ => None,
        })
    };

    let base_size = if default_marker { DEFAULT_MARKER_SIZE } else { CUSTOM_ICON_SIZE };
    let icon_size = [
        number(|l| l.width).unwrap_or(base_size[0]),
        number(|l| l.height).unwrap_or(base_size[1]),
    ];
    let builtin = |anchor: [f64; 2]| default_marker.then_some(anchor);

    let shadow_file = first_present(layers.iter().map(|l| l.shadow.as_ref()));
    let shadow_url = match shadow_file {
        Some(shadow) => Some(icon_path(icon_dir, shadow)),
        None => default_marker.then(|| DEFAULT_SHADOW_URL.to_string()),
    };
    let shadow_base = if default_marker { DEFAULT_SHADOW_SIZE } else { icon_size };
    let shadow_size = shadow_url.as_ref().map(|_| {
        [
            number(|l| l.shadow_width).unwrap_or(shadow_base[0]),
            number(|l| l.shadow_height).unwrap_or(shadow_base[1]),
        ]
    });
    let shadow_anchor = shadow_url
        .as_ref()
        .and_then(|_| pair(|l| (l.shadow_anchor_x, l.shadow_anchor_y)));

    let class_name = match first_present(layers.iter().map(|l| l.class.as_ref())) {
        Some(class) => format!("{MARKER_CLASS} {}", class.trim()),
        None => MARKER_CLASS.to_string(),
    };

    let retina = first_present(layers.iter().map(|l| l.retina.as_ref()));

    ResolvedIcon {
        icon_url: match file {
            Some(file) => icon_path(icon_dir, file),
            None => DEFAULT_MARKER_URL.to_string(),
        },
        icon_size,
        icon_anchor: pair(|l| (l.anchor_x, l.anchor_y)).or_else(|| builtin(DEFAULT_MARKER_ANCHOR)),
        tooltip_anchor: pair(|l| (l.tooltip_anchor_x, l.tooltip_anchor_y))
            .or_else(|| builtin(DEFAULT_TOOLTIP_ANCHOR)),
        icon_retina_url: match retina {
            Some(retina) => Some(icon_path(icon_dir, retina)),
            None => default_marker.then(|| DEFAULT_MARKER_RETINA_URL.to_string()),
        },
        shadow_url,
        shadow_size,
        shadow_anchor,
        class_name,
    }
}

/// Resolve regular path options
pub fn resolve_path(tour: &PathOptions, dataset: &PathOptions) -> ResolvedPath {
    let layers = [tour, dataset];
    let fallback = DEFAULT_PATH_COLOR.to_string();
    let color = first_present_or(layers.iter().map(|l| l.color.as_ref()), &fallback).clone();
    ResolvedPath {
        stroke: layers.iter().find_map(|l| l.stroke).unwrap_or(true),
        weight: finite(layers.iter().map(|l| l.weight)).unwrap_or(DEFAULT_PATH_WEIGHT),
        opacity: finite(layers.iter().map(|l| l.opacity)).unwrap_or(DEFAULT_PATH_OPACITY),
        fill: layers.iter().find_map(|l| l.fill).unwrap_or(true),
        fill_color: first_present(layers.iter().map(|l| l.fill_color.as_ref()))
            .cloned()
            .unwrap_or_else(|| color.clone()),
        fill_opacity: finite(layers.iter().map(|l| l.fill_opacity)).unwrap_or(DEFAULT_FILL_OPACITY),
        color,
    }
}

/// Resolve hover path options; unset keys inherit from the regular path
pub fn resolve_active_path(
    tour: &PathOptions,
    dataset: &PathOptions,
    regular: &ResolvedPath,
) -> ResolvedPath {
    let layers = [tour, dataset];
    ResolvedPath {
        stroke: layers.iter().find_map(|l| l.stroke).unwrap_or(regular.stroke),
        color: first_present(layers.iter().map(|l| l.color.as_ref()))
            .cloned()
            .unwrap_or_else(|| regular.color.clone()),
        weight: finite(layers.iter().map(|l| l.weight)).unwrap_or(regular.weight),
        opacity: finite(layers.iter().map(|l| l.opacity)).unwrap_or(regular.opacity),
        fill: layers.iter().find_map(|l| l.fill).unwrap_or(regular.fill),
        fill_color: first_present(layers.iter().map(|l| l.fill_color.as_ref()))
            .cloned()
            .unwrap_or_else(|| regular.fill_color.clone()),
        fill_opacity: finite(layers.iter().map(|l| l.fill_opacity)).unwrap_or(ACTIVE_FILL_OPACITY),
    }
}

/// Legend text and alt text; symbol fields are filled in by the caller
fn resolve_legend(overrides: &TourDatasetConfig, dataset: &Dataset) -> Option<LegendEntry> {
    let text = first_present([overrides.legend_text.as_ref(), dataset.legend_text.as_ref()])?;
    let alt = first_present_or(
        [
            overrides.legend_alt.as_ref(),
            overrides.legend_text.as_ref(),
            dataset.legend_alt.as_ref(),
            dataset.legend_text.as_ref(),
        ],
        text,
    );
    Some(LegendEntry {
        dataset: dataset.id().to_string(),
        text: text.clone(),
        alt: alt.clone(),
        symbol_alt: first_present([overrides.icon_alt.as_ref(), dataset.icon_alt.as_ref()])
            .cloned(),
        icon_url: None,
        path: None,
    })
}

fn finite(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    values.into_iter().flatten().find(|n| n.is_finite())
}

fn icon_path(icon_dir: &str, file: &str) -> String {
    let dir = icon_dir.trim_end_matches('/');
    if dir.is_empty() || file.contains("://") || file.starts_with('/') {
        file.to_string()
    } else {
        format!("{dir}/{file}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetSettings;
    use serde_json::{json, Value};

    fn points(count: usize) -> Vec<Value> {
        (1..=count)
            .map(|i| {
                json!({
                    "type": "Feature",
                    "id": format!("f{i}"),
                    "geometry": { "type": "Point", "coordinates": [i as f64, i as f64] },
                    "properties": { "name": format!("Feature {i}") },
                    "popup_content": format!("dataset popup {i}")
                })
            })
            .collect()
    }

    #[test]
    fn test_default_marker() {
        let icon = resolve_icon(&IconOptions::default(), &IconOptions::default(), "icons");
        assert_eq!(icon.icon_url, DEFAULT_MARKER_URL);
        assert_eq!(icon.icon_size, DEFAULT_MARKER_SIZE);
        assert_eq!(icon.icon_anchor, Some(DEFAULT_MARKER_ANCHOR));
        assert_eq!(icon.shadow_url.as_deref(), Some(DEFAULT_SHADOW_URL));
        assert_eq!(icon.shadow_size, Some(DEFAULT_SHADOW_SIZE));
        assert_eq!(icon.class_name, "leaflet-marker");
    }

    #[test]
    fn test_custom_icon_drops_partial_anchor_and_shadow() {
        let dataset = IconOptions {
            file: Some("ship.png".to_string()),
            anchor_x: Some(4.0),
            class: Some("harbour".to_string()),
            ..Default::default()
        };
        let icon = resolve_icon(&IconOptions::default(), &dataset, "assets/icons/");
        assert_eq!(icon.icon_url, "assets/icons/ship.png");
        assert_eq!(icon.icon_size, CUSTOM_ICON_SIZE);
        assert_eq!(icon.icon_anchor, None);
        assert_eq!(icon.tooltip_anchor, None);
        assert_eq!(icon.shadow_url, None);
        assert_eq!(icon.shadow_size, None);
        assert_eq!(icon.icon_retina_url, None);
        assert_eq!(icon.class_name, "leaflet-marker harbour");
    }

    #[test]
    fn test_anchor_pairs_come_from_one_layer() {
        let tour = IconOptions { anchor_x: Some(1.0), ..Default::default() };
        let dataset = IconOptions {
            file: Some("a.png".to_string()),
            anchor_x: Some(7.0),
            anchor_y: Some(8.0),
            ..Default::default()
        };
        let icon = resolve_icon(&tour, &dataset, "");
        assert_eq!(icon.icon_anchor, Some([7.0, 8.0]));
        assert_eq!(icon.icon_url, "a.png");
    }

    #[test]
    fn test_use_defaults_ignores_dataset_icon() {
        let tour = IconOptions { use_defaults: true, width: Some(30.0), ..Default::default() };
        let dataset = IconOptions { file: Some("a.png".to_string()), ..Default::default() };
        let icon = resolve_icon(&tour, &dataset, "icons");
        assert_eq!(icon.icon_url, DEFAULT_MARKER_URL);
        assert_eq!(icon.icon_size, [30.0, 41.0]);
    }

    #[test]
    fn test_custom_shadow_sizes_from_icon() {
        let dataset = IconOptions {
            file: Some("a.png".to_string()),
            width: Some(20.0),
            height: Some(22.0),
            shadow: Some("a-shadow.png".to_string()),
            shadow_anchor_x: Some(3.0),
            shadow_anchor_y: Some(4.0),
            ..Default::default()
        };
        let icon = resolve_icon(&IconOptions::default(), &dataset, "icons");
        assert_eq!(icon.shadow_url.as_deref(), Some("icons/a-shadow.png"));
        assert_eq!(icon.shadow_size, Some([20.0, 22.0]));
        assert_eq!(icon.shadow_anchor, Some([3.0, 4.0]));
    }

    #[test]
    fn test_path_precedence() {
        let tour = PathOptions { color: Some("red".to_string()), ..Default::default() };
        let dataset = PathOptions {
            color: Some("blue".to_string()),
            weight: Some(6.0),
            fill: Some(false),
            ..Default::default()
        };
        let path = resolve_path(&tour, &dataset);
        assert_eq!(path.color, "red");
        assert_eq!(path.fill_color, "red");
        assert_eq!(path.weight, 6.0);
        assert!(!path.fill);
        assert!(path.stroke);
        assert_eq!(path.fill_opacity, DEFAULT_FILL_OPACITY);

        let active = resolve_active_path(
            &PathOptions::default(),
            &PathOptions { weight: Some(9.0), ..Default::default() },
            &path,
        );
        assert_eq!(active.weight, 9.0);
        assert_eq!(active.color, "red");
        assert_eq!(active.fill_opacity, ACTIVE_FILL_OPACITY);
    }

    #[test]
    fn test_partition_with_popup_overrides() {
        let dataset = Dataset::from_records("sites", DatasetSettings::default(), &points(12));

        let mut removed = TourFeatureEntry::new("f2");
        removed.remove_popup = true;
        let mut both = TourFeatureEntry::new("f3");
        both.popup_content = Some("tour popup".to_string());
        both.remove_popup = true;
        let entries = vec![TourFeatureEntry::new("f1"), removed, both, TourFeatureEntry::new("f4")];

        let merged = dataset.merge_tour_data(&TourDatasetConfig::new("sites"), &entries, "icons");

        assert_eq!(merged.shown.len(), 4);
        assert_eq!(merged.hidden.len(), 8);
        assert_eq!(merged.shown["f1"].popup_content.as_deref(), Some("dataset popup 1"));
        assert_eq!(merged.shown["f2"].popup_content, None);
        assert_eq!(merged.shown["f3"].popup_content.as_deref(), Some("tour popup"));
        assert!(merged.hidden.contains_key("f12"));
    }

    #[test]
    fn test_show_all_with_empty_list() {
        let dataset = Dataset::from_records("sites", DatasetSettings::default(), &points(5));
        let mut overrides = TourDatasetConfig::new("sites");
        overrides.show_all = true;

        let merged = dataset.merge_tour_data(&overrides, &[], "icons");
        assert!(merged.hidden.is_empty());
        assert_eq!(merged.shown.len(), dataset.len());
        assert!(merged.icon.is_some());
        assert!(merged.path.is_none());
    }

    #[test]
    fn test_tour_custom_name_and_absent_ids() {
        let dataset = Dataset::from_records("sites", DatasetSettings::default(), &points(2));
        let mut renamed = TourFeatureEntry::new("f1");
        renamed.custom_name = Some("Lighthouse".to_string());

        let merged = dataset.merge_tour_data(
            &TourDatasetConfig::new("sites"),
            &[renamed, TourFeatureEntry::new("ghost")],
            "icons",
        );
        assert_eq!(merged.shown.len(), 1);
        assert_eq!(merged.shown["f1"].name, "Lighthouse");
        assert_eq!(merged.hidden.len(), 1);
    }

    #[test]
    fn test_legend_resolution() {
        let settings = DatasetSettings {
            legend_text: Some("Sites".to_string()),
            legend_alt: Some("Historic sites".to_string()),
            icon_alt: Some("pin".to_string()),
            ..Default::default()
        };
        let dataset = Dataset::from_records("sites", settings, &points(1));

        let merged = dataset.merge_tour_data(&TourDatasetConfig::new("sites"), &[], "icons");
        let legend = merged.legend.unwrap();
        assert_eq!(legend.text, "Sites");
        assert_eq!(legend.alt, "Historic sites");
        assert_eq!(legend.symbol_alt.as_deref(), Some("pin"));
        assert_eq!(legend.icon_url.as_deref(), Some(DEFAULT_MARKER_URL));

        let mut overrides = TourDatasetConfig::new("sites");
        overrides.legend_text = Some("Tour sites".to_string());
        let legend = dataset.merge_tour_data(&overrides, &[], "icons").legend.unwrap();
        assert_eq!(legend.text, "Tour sites");
        assert_eq!(legend.alt, "Tour sites");

        let bare = Dataset::from_records("bare", DatasetSettings::default(), &points(1));
        let merged = bare.merge_tour_data(&TourDatasetConfig::new("bare"), &[], "icons");
        assert!(merged.legend.is_none());
    }

    #[test]
    fn test_merge_does_not_change_dataset() {
        let dataset = Dataset::from_records("sites", DatasetSettings::default(), &points(3));
        let before = dataset.clone();
        let mut entry = TourFeatureEntry::new("f1");
        entry.custom_name = Some("Other".to_string());
        let _ = dataset.merge_tour_data(&TourDatasetConfig::new("sites"), &[entry], "icons");
        assert_eq!(dataset, before);
    }
}
