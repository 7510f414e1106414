//! View resolution against an assembled tour

use std::collections::BTreeMap;

use tourmap_core::models::{Geometry, ViewConfig};

use crate::diagnostics::{Diagnostic, Diagnostics, Scope};
use crate::output::{BasemapSpec, ViewSpec};
use crate::viewport::resolve_start;

/// What a view is resolved against
pub(crate) struct TourContext<'a> {
    /// Ids of the tour's shown features
    pub shown: &'a BTreeMap<String, geojson::Feature>,
    /// Shown and hidden geometries, for start locations
    pub locations: &'a BTreeMap<String, Geometry>,
    /// Basemaps that survived registry lookup and bounds validation
    pub basemaps: &'a BTreeMap<String, BasemapSpec>,
}

pub(crate) fn resolve_view(
    view: &ViewConfig,
    tour: &TourContext<'_>,
    diagnostics: &mut Diagnostics,
) -> ViewSpec {
    let scope = Scope::View(view.id.clone());

    let mut features: Vec<String> = Vec::new();
    for id in &view.features {
        if features.contains(id) {
            continue;
        }
        if tour.shown.contains_key(id) {
            features.push(id.clone());
        } else {
            diagnostics.push(Diagnostic::UnknownFeature { scope: scope.clone(), id: id.clone() });
        }
    }

    // Unknown basemaps were already reported while resolving the tour
    let mut basemaps: Vec<String> = Vec::new();
    for file in &view.basemaps {
        if tour.basemaps.contains_key(file) && !basemaps.contains(file) {
            basemaps.push(file.clone());
        }
    }

    ViewSpec {
        title: view.title.clone().filter(|t| !t.trim().is_empty()),
        basemaps,
        only_show_view_features: view.only_show_view_features && !features.is_empty(),
        features,
        no_tour_basemaps: view.no_tour_basemaps,
        remove_tile_server: view.remove_tile_server,
        bounds: resolve_start(&view.start, tour.locations, &scope, diagnostics),
    }
}
