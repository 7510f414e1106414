//! Render command implementation

use anyhow::{Context, Result};
use std::fs;
use tourmap_engine::TourAssembler;

use crate::cli::RenderArgs;
use crate::config_loader::load_config;
use crate::loader::{load_dataset_dir, load_tour};
use crate::output::OutputWriter;
use crate::output_types::RenderOutput;

pub fn execute(args: RenderArgs, output: &OutputWriter) -> Result<()> {
    let config = load_config(&args.config)?;
    let defaults = config.global_defaults();

    let datasets = load_dataset_dir(&args.datasets)
        .with_context(|| format!("Failed to load datasets from {}", args.datasets.display()))?;
    let tour = load_tour(&args.tour)
        .with_context(|| format!("Failed to load tour {}", args.tour.display()))?;

    let assembly =
        TourAssembler::new(&datasets, config.basemap_registry(), &defaults).assemble(&tour);

    for diagnostic in &assembly.diagnostics {
        output.warning(diagnostic);
    }

    let Some(out) = args.out else {
        return output.result(&assembly.spec);
    };

    let rendered = serde_json::to_string_pretty(&assembly.spec)?;
    fs::write(&out, rendered).with_context(|| format!("Failed to write {}", out.display()))?;

    let spec = &assembly.spec;
    if output.is_json() {
        output.result(RenderOutput {
            tour: spec.id.clone(),
            out: out.display().to_string(),
            feature_count: spec.features.len(),
            dataset_count: spec.datasets.len(),
            basemap_count: spec.basemaps.len(),
            view_count: spec.views.len(),
            skipped: assembly.diagnostics.iter().map(ToString::to_string).collect(),
        })?;
    } else {
        output.success(format!("Rendered tour '{}' to {}", spec.id, out.display()));
        output.kv("Features", spec.features.len());
        output.kv("Datasets", spec.datasets.len());
        output.kv("Basemaps", spec.basemaps.len());
        output.kv("Views", spec.views.len());
        if !assembly.diagnostics.is_empty() {
            output.kv("Skipped references", assembly.diagnostics.len());
        }
    }

    Ok(())
}
