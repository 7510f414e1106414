//! Property tests for the dataset merge partition

use proptest::prelude::*;
use serde_json::{json, Value};
use tourmap_core::models::{TourDatasetConfig, TourFeatureEntry};
use tourmap_engine::{Dataset, DatasetSettings};

fn records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "type": "Feature",
                "id": format!("f{i}"),
                "geometry": { "type": "Point", "coordinates": [0.5 * i as f64, 0.25 * i as f64] },
                "properties": { "name": format!("Feature {i}") }
            })
        })
        .collect()
}

proptest! {
    #[test]
    fn shown_and_hidden_partition_the_dataset(
        count in 0usize..30,
        listed in proptest::collection::vec(0usize..40, 0..20),
        show_all in any::<bool>(),
    ) {
        let dataset = Dataset::from_records("ds", DatasetSettings::default(), &records(count));
        let entries: Vec<TourFeatureEntry> =
            listed.iter().map(|i| TourFeatureEntry::new(format!("f{i}"))).collect();
        let mut overrides = TourDatasetConfig::new("ds");
        overrides.show_all = show_all;

        let merged = dataset.merge_tour_data(&overrides, &entries, "icons");

        prop_assert_eq!(merged.shown.len() + merged.hidden.len(), dataset.len());
        prop_assert!(merged.shown.keys().all(|id| !merged.hidden.contains_key(id)));
        if show_all {
            prop_assert!(merged.hidden.is_empty());
        } else {
            for id in merged.shown.keys() {
                prop_assert!(entries.iter().any(|e| &e.id == id));
            }
        }
    }
}
