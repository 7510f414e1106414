//! A single geographic entity inside a dataset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tourmap_core::layering::first_present;
use tourmap_core::models::{Geometry, GeometryType};
use tourmap_geo::validation::validate_geometry;

/// Dataset-level presentation fields of a feature
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetFeatureFields {
    #[serde(alias = "popupContent")]
    pub popup_content: Option<String>,
    #[serde(alias = "hidden")]
    pub hide: bool,
}

/// Partial update to a feature as edited at the dataset level.
///
/// `custom_name`, `popup_content` and `hide` are applied as given, so leaving
/// them out clears them. `coordinates` and `properties` are only replaced when
/// present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureUpdate {
    pub id: String,
    #[serde(alias = "customName")]
    pub custom_name: Option<String>,
    pub coordinates: Option<Value>,
    pub properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub fields: DatasetFeatureFields,
}

impl FeatureUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }
}

/// One validated geographic entity
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: String,
    geometry: Geometry,
    properties: Map<String, Value>,
    custom_name: Option<String>,
    name: String,
    popup_content: Option<String>,
    hidden: bool,
}

impl Feature {
    /// Build a feature from one raw GeoJSON-like record.
    ///
    /// Returns `None` unless the record is tagged `Feature`, has a non-empty id,
    /// and carries a geometry of the `expected` type whose coordinates validate.
    pub fn from_record(
        record: &Value,
        expected: GeometryType,
        name_property: Option<&str>,
    ) -> Option<Self> {
        let tag = record.get("type")?.as_str()?;
        if !tag.eq_ignore_ascii_case("feature") {
            return None;
        }

        let id = record_id(record.get("id")?)?;

        let geometry_block = record.get("geometry")?;
        let declared = geometry_block.get("type")?.as_str()?;
        if GeometryType::parse_lenient(declared) != expected {
            return None;
        }
        let geometry = validate_geometry(geometry_block.get("coordinates")?, expected)?;

        let properties = match record.get("properties") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        let custom_name = string_field(record, &["custom_name", "customName"]);
        let name = resolve_name(custom_name.as_deref(), &properties, name_property, &id)?;

        Some(Self {
            id,
            geometry,
            properties,
            custom_name,
            name,
            popup_content: string_field(record, &["popup_content", "popupContent"]),
            hidden: matches!(
                record.get("hide").or_else(|| record.get("hidden")),
                Some(Value::Bool(true))
            ),
        })
    }

    /// Build features from a batch of records.
    ///
    /// Invalid records and repeated ids are dropped; survivors keep their order.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a Value>,
        expected: GeometryType,
        name_property: Option<&str>,
    ) -> Vec<Self> {
        let mut features: Vec<Feature> = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            match Feature::from_record(record, expected, name_property) {
                Some(feature) if features.iter().any(|f| f.id == feature.id) => {
                    tracing::debug!(id = %feature.id, index, "Dropping record with duplicate id");
                }
                Some(feature) => features.push(feature),
                None => tracing::debug!(index, "Dropping invalid feature record"),
            }
        }
        features
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry.geometry_type()
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn custom_name(&self) -> Option<&str> {
        self.custom_name.as_deref()
    }

    /// Resolved display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn popup_content(&self) -> Option<&str> {
        self.popup_content.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Apply popup content and the hide flag; identity and geometry are untouched
    pub fn set_dataset_fields(&mut self, fields: &DatasetFeatureFields) {
        self.popup_content =
            fields.popup_content.clone().filter(|content| !content.trim().is_empty());
        self.hidden = fields.hide;
    }

    /// Apply a dataset-level edit.
    ///
    /// Replacement coordinates must validate for the feature's existing type;
    /// otherwise the current geometry is kept.
    pub fn update(&mut self, update: &FeatureUpdate, name_property: Option<&str>) {
        self.custom_name = update.custom_name.clone().filter(|name| !name.trim().is_empty());

        if let Some(coordinates) = &update.coordinates {
            match validate_geometry(coordinates, self.geometry_type()) {
                Some(geometry) => self.geometry = geometry,
                None => tracing::debug!(id = %self.id, "Ignoring invalid replacement coordinates"),
            }
        }

        if let Some(properties) = &update.properties {
            if *properties != self.properties {
                self.properties = properties.clone();
            }
        }

        self.resolve_name(name_property);
        self.set_dataset_fields(&update.fields);
    }

    /// Recompute the display name against a (possibly new) name property
    pub fn resolve_name(&mut self, name_property: Option<&str>) {
        if let Some(name) =
            resolve_name(self.custom_name.as_deref(), &self.properties, name_property, &self.id)
        {
            self.name = name;
        }
    }
}

/// Custom name > name property value > id
fn resolve_name(
    custom_name: Option<&str>,
    properties: &Map<String, Value>,
    name_property: Option<&str>,
    id: &str,
) -> Option<String> {
    let property_value = name_property.and_then(|key| properties.get(key)).and_then(display_value);
    first_present([custom_name, property_value.as_deref(), Some(id)]).map(str::to_string)
}

/// Property value as name text; null, false and containers do not count
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn record_id(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

fn string_field(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|value| !value.trim().is_empty())
        .map(str::to_string)
}
