//! Validate command implementation

use anyhow::{Context, Result};
use tabled::Tabled;

use crate::cli::ValidateArgs;
use crate::loader::load_dataset;
use crate::output::OutputWriter;
use crate::output_types::{FeatureSummary, ValidateOutput};

pub fn execute(args: ValidateArgs, output: &OutputWriter) -> Result<()> {
    let loaded = load_dataset(&args.path)
        .with_context(|| format!("Failed to load {}", args.path.display()))?;
    let mut dataset = loaded.dataset;

    if let Some(property) = args.name_property.as_deref() {
        if !dataset.set_name_property(property) {
            output.warning(format!(
                "Property '{}' not found; keeping the current name property (available: {})",
                property,
                dataset.property_keys().join(", ")
            ));
        }
    }

    let report = ValidateOutput {
        dataset: dataset.id().to_string(),
        display_name: dataset.display_name().to_string(),
        geometry_type: dataset.feature_type(),
        records: loaded.records,
        valid: dataset.len(),
        dropped: loaded.records - dataset.len(),
        name_property: dataset.name_property().map(str::to_string),
        properties: dataset.property_keys().to_vec(),
        extent: dataset.extent().map(|b| b.corners()),
        features: dataset
            .features()
            .iter()
            .map(|f| FeatureSummary {
                id: f.id().to_string(),
                name: f.name().to_string(),
                has_popup: f.popup_content().is_some(),
                hidden: f.is_hidden(),
            })
            .collect(),
    };

    if output.is_json() {
        return output.result(report);
    }

    output.section(format!("Dataset {}", report.display_name));
    output.kv("Geometry type", report.geometry_type);
    output.kv("Records", report.records);
    output.kv("Valid features", report.valid);
    output.kv("Dropped records", report.dropped);
    output.kv("Name property", report.name_property.as_deref().unwrap_or("(none)"));
    match report.extent {
        Some([[south, west], [north, east]]) => {
            output.kv("Extent", format!("S {south} W {west} N {north} E {east}"))
        }
        None => output.kv("Extent", "(empty)"),
    }

    #[derive(Tabled, serde::Serialize)]
    struct FeatureRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Popup")]
        popup: bool,
        #[tabled(rename = "Hidden")]
        hidden: bool,
    }

    output.section("Features");
    output.table(
        report
            .features
            .into_iter()
            .map(|f| FeatureRow { id: f.id, name: f.name, popup: f.has_popup, hidden: f.hidden })
            .collect(),
    )?;

    if report.dropped > 0 {
        output.warning(format!(
            "{} record(s) did not form a valid {} feature",
            report.dropped, report.geometry_type
        ));
    }

    Ok(())
}
