//! Dataset: a named collection of features with shared presentation defaults

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tourmap_core::models::{Bounds, GeometryType, IconOptions, PathOptions};
use tourmap_geo::models::extent;

use crate::feature::{Feature, FeatureUpdate};

/// Author-editable dataset defaults, as stored next to the records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Display name; the dataset id is used when absent
    pub name: Option<String>,
    /// Expected geometry type; taken from the first record when absent
    pub feature_type: Option<String>,
    pub name_property: Option<String>,
    pub icon: IconOptions,
    pub svg: PathOptions,
    pub svg_active: PathOptions,
    pub legend_text: Option<String>,
    pub legend_alt: Option<String>,
    pub icon_alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    id: String,
    display_name: String,
    feature_type: GeometryType,
    name_property: Option<String>,
    property_keys: Vec<String>,
    features: Vec<Feature>,
    pub(crate) icon: IconOptions,
    pub(crate) svg: PathOptions,
    pub(crate) svg_active: PathOptions,
    pub(crate) legend_text: Option<String>,
    pub(crate) legend_alt: Option<String>,
    pub(crate) icon_alt: Option<String>,
}

impl Dataset {
    /// Build a dataset from raw records.
    ///
    /// Records that do not form a valid feature of the dataset's geometry type
    /// are dropped.
    pub fn from_records(
        id: impl Into<String>,
        settings: DatasetSettings,
        records: &[Value],
    ) -> Self {
        let id = id.into();

        let feature_type = settings
            .feature_type
            .as_deref()
            .map(GeometryType::parse_lenient)
            .or_else(|| records.first().and_then(declared_type))
            .unwrap_or_default();

        let property_keys = collect_property_keys(records);
        let name_property = choose_name_property(settings.name_property.as_deref(), &property_keys);

        let features = Feature::from_records(records, feature_type, name_property.as_deref());
        tracing::debug!(
            dataset = %id,
            records = records.len(),
            features = features.len(),
            feature_type = %feature_type,
            "Built dataset"
        );

        Self {
            display_name: settings
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| id.clone()),
            id,
            feature_type,
            name_property,
            property_keys,
            features,
            icon: settings.icon,
            svg: settings.svg,
            svg_active: settings.svg_active,
            legend_text: settings.legend_text,
            legend_alt: settings.legend_alt,
            icon_alt: settings.icon_alt,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn feature_type(&self) -> GeometryType {
        self.feature_type
    }

    pub fn name_property(&self) -> Option<&str> {
        self.name_property.as_deref()
    }

    /// Property keys across all records, in first-seen order
    pub fn property_keys(&self) -> &[String] {
        &self.property_keys
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id() == id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Switch the name property and re-resolve every feature name.
    ///
    /// Returns false (and changes nothing) if no feature carries `property`.
    pub fn set_name_property(&mut self, property: &str) -> bool {
        if !self.property_keys.iter().any(|key| key == property) {
            tracing::debug!(dataset = %self.id, property, "Ignoring unknown name property");
            return false;
        }
        self.name_property = Some(property.to_string());
        for feature in &mut self.features {
            feature.resolve_name(self.name_property.as_deref());
        }
        true
    }

    /// Apply dataset-level edits by feature id.
    ///
    /// Unknown ids are ignored. Returns the number of features updated.
    pub fn apply_feature_updates(&mut self, updates: &[FeatureUpdate]) -> usize {
        let mut applied = 0;
        for update in updates {
            match self.features.iter_mut().find(|f| f.id() == update.id) {
                Some(feature) => {
                    feature.update(update, self.name_property.as_deref());
                    applied += 1;
                }
                None => tracing::debug!(
                    dataset = %self.id,
                    id = %update.id,
                    "Ignoring update for unknown feature"
                ),
            }
        }
        applied
    }

    /// Bounding box over every feature
    pub fn extent(&self) -> Option<Bounds> {
        extent(self.features.iter().map(Feature::geometry))
    }
}

fn declared_type(record: &Value) -> Option<GeometryType> {
    record
        .get("geometry")?
        .get("type")?
        .as_str()
        .map(GeometryType::parse_lenient)
}

fn collect_property_keys(records: &[Value]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for properties in records.iter().filter_map(|r| r.get("properties")?.as_object()) {
        for key in properties.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// The requested property when some record carries it, else the first key seen
fn choose_name_property(requested: Option<&str>, keys: &[String]) -> Option<String> {
    match requested {
        Some(property) if keys.iter().any(|k| k == property) => Some(property.to_string()),
        _ => keys.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(id: &str, props: Value) -> Value {
        json!({
            "type": "Feature",
            "id": id,
            "geometry": { "type": "Point", "coordinates": [10.0, 20.0] },
            "properties": props
        })
    }

    #[test]
    fn test_feature_type_from_first_record() {
        let records = vec![
            json!({
                "type": "Feature",
                "id": "route",
                "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] }
            }),
            point("p", json!({})),
        ];
        let dataset = Dataset::from_records("routes", DatasetSettings::default(), &records);
        assert_eq!(dataset.feature_type(), GeometryType::LineString);
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.display_name(), "routes");
    }

    #[test]
    fn test_name_property_falls_back_to_first_key() {
        let settings = DatasetSettings {
            name_property: Some("missing".to_string()),
            ..Default::default()
        };
        let records = vec![point("a", json!({ "label": "Alpha", "title": "A" }))];
        let dataset = Dataset::from_records("ds", settings, &records);
        assert_eq!(dataset.property_keys(), ["label".to_string(), "title".to_string()]);
        assert_eq!(dataset.name_property(), Some("label"));
        assert_eq!(dataset.features()[0].name(), "Alpha");
    }

    #[test]
    fn test_set_name_property() {
        let records = vec![
            point("a", json!({ "label": "Alpha", "title": "First" })),
            point("b", json!({ "label": "Beta" })),
        ];
        let mut dataset = Dataset::from_records("ds", DatasetSettings::default(), &records);

        assert!(!dataset.set_name_property("nope"));
        assert_eq!(dataset.name_property(), Some("label"));

        assert!(dataset.set_name_property("title"));
        assert_eq!(dataset.feature("a").unwrap().name(), "First");
        assert_eq!(dataset.feature("b").unwrap().name(), "b");
    }

    #[test]
    fn test_apply_feature_updates_ignores_unknown_ids() {
        let records = vec![point("a", json!({})), point("b", json!({}))];
        let mut dataset = Dataset::from_records("ds", DatasetSettings::default(), &records);

        let mut rename = FeatureUpdate::new("a");
        rename.custom_name = Some("Renamed".to_string());
        let applied = dataset.apply_feature_updates(&[rename, FeatureUpdate::new("zzz")]);

        assert_eq!(applied, 1);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.feature("a").unwrap().name(), "Renamed");
        assert!(dataset.feature("zzz").is_none());
    }

    #[test]
    fn test_extent() {
        let records = vec![
            point("a", json!({})),
            json!({
                "type": "Feature",
                "id": "b",
                "geometry": { "type": "Point", "coordinates": [-5.0, 30.0] }
            }),
        ];
        let dataset = Dataset::from_records("ds", DatasetSettings::default(), &records);
        assert_eq!(dataset.extent(), Some(Bounds::new(20.0, -5.0, 30.0, 10.0)));

        let empty = Dataset::from_records("empty", DatasetSettings::default(), &[]);
        assert!(empty.is_empty());
        assert_eq!(empty.extent(), None);
        assert_eq!(empty.feature_type(), GeometryType::Point);
    }
}
