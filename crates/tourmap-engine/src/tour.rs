//! Tour assembly.
//!
//! [`TourAssembler`] borrows the dataset, basemap and global registries and
//! turns one [`TourConfig`] into a [`RenderSpec`]. Assembly is a pure function
//! of these inputs; references it cannot resolve are skipped and reported as
//! [`Diagnostic`]s.

use std::collections::{BTreeMap, HashSet};

use serde_json::{json, Map};
use tourmap_core::config::{GlobalDefaults, DEFAULT_TILE_PROVIDER};
use tourmap_core::layering::first_present_or;
use tourmap_core::models::{Attribution, BasemapInfo, Geometry, TileServerSelection, TourConfig};
use tourmap_geo::bounds::validate_bounds;
use tourmap_geo::models::GeometryExt;

use crate::attribution::merge_attribution;
use crate::dataset::Dataset;
use crate::diagnostics::{Diagnostic, Diagnostics, Scope};
use crate::merge::MergedDatasetView;
use crate::output::{
    Assembly, BasemapSpec, DatasetStyle, Popup, RenderSpec, TileServer, TourOptions,
};
use crate::view::{resolve_view, TourContext};
use crate::viewport::resolve_start;

/// Tile server picked for a tour, with the credits that come with it
struct ActiveTileServer {
    server: TileServer,
    attribution: Vec<Attribution>,
}

pub struct TourAssembler<'a> {
    datasets: &'a BTreeMap<String, Dataset>,
    basemaps: &'a BTreeMap<String, BasemapInfo>,
    defaults: &'a GlobalDefaults,
}

impl<'a> TourAssembler<'a> {
    pub fn new(
        datasets: &'a BTreeMap<String, Dataset>,
        basemaps: &'a BTreeMap<String, BasemapInfo>,
        defaults: &'a GlobalDefaults,
    ) -> Self {
        Self { datasets, basemaps, defaults }
    }

    pub fn assemble(&self, tour: &TourConfig) -> Assembly {
        let mut diagnostics = Diagnostics::default();

        let merged = self.merge_datasets(tour, &mut diagnostics);

        let mut features: BTreeMap<String, geojson::Feature> = BTreeMap::new();
        let mut locations: BTreeMap<String, Geometry> = BTreeMap::new();
        let mut popups = BTreeMap::new();
        let mut datasets = BTreeMap::new();
        let mut legend = Vec::new();

        for view in merged {
            for (id, geometry) in view.hidden {
                locations.entry(id).or_insert(geometry);
            }
            for (id, shown) in view.shown {
                if features.contains_key(&id) {
                    tracing::debug!(
                        %id,
                        dataset = %view.dataset_id,
                        "Feature id already shown by another dataset"
                    );
                    continue;
                }
                let has_popup = shown.popup_content.is_some();
                if let Some(content) = shown.popup_content {
                    popups.insert(id.clone(), Popup { name: shown.name.clone(), content });
                }
                let record =
                    feature_record(&id, &shown.name, &shown.geometry, &view.dataset_id, has_popup);
                features.insert(id.clone(), record);
                locations.insert(id, shown.geometry);
            }
            legend.extend(view.legend);
            datasets.insert(
                view.dataset_id,
                DatasetStyle {
                    feature_type: view.feature_type,
                    icon: view.icon,
                    path: view.path,
                    active_path: view.active_path,
                },
            );
        }

        for entry in &tour.features {
            if !features.contains_key(&entry.id) {
                diagnostics.push(Diagnostic::UnknownFeature {
                    scope: Scope::Tour,
                    id: entry.id.clone(),
                });
            }
        }

        let basemaps = self.resolve_basemaps(tour, &mut diagnostics);
        let tile_server = self.resolve_tile_server(&tour.tile_server, &mut diagnostics);

        let basemap_credits = basemaps
            .keys()
            .filter_map(|file| self.basemaps.get(file))
            .map(|info| info.attribution.as_slice());
        let attribution = merge_attribution(
            std::iter::once(self.defaults.attribution.as_slice())
                .chain(basemap_credits)
                .chain(tile_server.as_ref().map(|t| t.attribution.as_slice()))
                .chain(std::iter::once(tour.attribution.as_slice())),
        );

        let max_bounds = tour.max_bounds.as_ref().and_then(|raw| {
            let bounds = validate_bounds(raw);
            if bounds.is_none() {
                diagnostics.push(Diagnostic::InvalidMaxBounds);
            }
            bounds
        });

        let options = TourOptions {
            min_zoom: *first_present_or([tour.min_zoom.as_ref()], &self.defaults.min_zoom),
            max_zoom: *first_present_or([tour.max_zoom.as_ref()], &self.defaults.max_zoom),
            max_bounds,
            bounds: resolve_start(&tour.start, &locations, &Scope::Tour, &mut diagnostics),
            tile_server: tile_server.map(|t| t.server),
            attribution,
        };

        let context = TourContext { shown: &features, locations: &locations, basemaps: &basemaps };
        let views: BTreeMap<String, _> = tour
            .views
            .iter()
            .map(|view| (view.id.clone(), resolve_view(view, &context, &mut diagnostics)))
            .collect();

        let diagnostics = diagnostics.into_vec();
        tracing::info!(
            tour = %tour.id,
            features = features.len(),
            basemaps = basemaps.len(),
            skipped = diagnostics.len(),
            "Assembled tour"
        );

        Assembly {
            spec: RenderSpec {
                id: tour.id.clone(),
                title: tour.title.clone(),
                features,
                datasets,
                basemaps,
                legend,
                popups,
                views,
                options,
            },
            diagnostics,
        }
    }

    fn merge_datasets(
        &self,
        tour: &TourConfig,
        diagnostics: &mut Diagnostics,
    ) -> Vec<MergedDatasetView> {
        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for overrides in &tour.datasets {
            if !seen.insert(overrides.id.as_str()) {
                continue;
            }
            match self.datasets.get(&overrides.id) {
                Some(dataset) => merged.push(dataset.merge_tour_data(
                    overrides,
                    &tour.features,
                    &self.defaults.icon_dir,
                )),
                None => diagnostics.push(Diagnostic::UnknownDataset { id: overrides.id.clone() }),
            }
        }
        merged
    }

    /// Tour basemaps plus every view's, looked up and bounds-checked once each
    fn resolve_basemaps(
        &self,
        tour: &TourConfig,
        diagnostics: &mut Diagnostics,
    ) -> BTreeMap<String, BasemapSpec> {
        let references =
            tour.basemaps.iter().chain(tour.views.iter().flat_map(|v| v.basemaps.iter()));

        let mut seen = HashSet::new();
        let mut resolved = BTreeMap::new();
        for file in references {
            if !seen.insert(file.as_str()) {
                continue;
            }
            let Some(info) = self.basemaps.get(file) else {
                diagnostics.push(Diagnostic::UnknownBasemap { file: file.clone() });
                continue;
            };
            let Some(bounds) = info.bounds.as_ref().and_then(validate_bounds) else {
                diagnostics.push(Diagnostic::InvalidBasemapBounds { file: file.clone() });
                continue;
            };
            resolved.insert(
                file.clone(),
                BasemapSpec {
                    url: info
                        .url
                        .clone()
                        .filter(|u| !u.trim().is_empty())
                        .unwrap_or_else(|| file.clone()),
                    bounds,
                    min_zoom: info.min_zoom,
                    max_zoom: info.max_zoom,
                },
            );
        }
        resolved
    }

    /// Tour selection > tour url > global selection > global url > built-in provider
    fn resolve_tile_server(
        &self,
        tour: &TileServerSelection,
        diagnostics: &mut Diagnostics,
    ) -> Option<ActiveTileServer> {
        self.named_tile_server(tour, diagnostics)
            .or_else(|| explicit_tile_server(tour))
            .or_else(|| self.named_tile_server(&self.defaults.tile_server, diagnostics))
            .or_else(|| explicit_tile_server(&self.defaults.tile_server))
            .or_else(|| self.provider(DEFAULT_TILE_PROVIDER))
    }

    fn provider(&self, name: &str) -> Option<ActiveTileServer> {
        let provider = self.defaults.tile_providers.get(name)?;
        Some(ActiveTileServer {
            server: TileServer { name: Some(name.to_string()), url: provider.url.clone() },
            attribution: provider.attribution.clone(),
        })
    }

    fn named_tile_server(
        &self,
        selection: &TileServerSelection,
        diagnostics: &mut Diagnostics,
    ) -> Option<ActiveTileServer> {
        let name = selection.select.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let server = self.provider(name);
        if server.is_none() {
            diagnostics.push(Diagnostic::UnknownTileServer { name: name.to_string() });
        }
        server
    }
}

fn explicit_tile_server(selection: &TileServerSelection) -> Option<ActiveTileServer> {
    let url = selection.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
    Some(ActiveTileServer {
        server: TileServer { name: None, url: url.to_string() },
        attribution: selection.attribution.clone(),
    })
}

fn feature_record(
    id: &str,
    name: &str,
    geometry: &Geometry,
    dataset: &str,
    has_popup: bool,
) -> geojson::Feature {
    let mut properties = Map::new();
    properties.insert("name".to_string(), json!(name));
    properties.insert("dataset".to_string(), json!(dataset));
    properties.insert("hasPopup".to_string(), json!(has_popup));

    geojson::Feature {
        bbox: None,
        geometry: Some(geometry.to_geojson_geometry()),
        id: Some(geojson::feature::Id::String(id.to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}
