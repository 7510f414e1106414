//! Bounds command implementation

use anyhow::{bail, Result};
use tourmap_geo::bounds_from_center_and_radius;

use crate::cli::BoundsArgs;
use crate::output::OutputWriter;
use crate::output_types::BoundsOutput;

pub fn execute(args: BoundsArgs, output: &OutputWriter) -> Result<()> {
    let Some(bounds) = bounds_from_center_and_radius(args.lat, args.long, args.radius) else {
        bail!(
            "No valid bounds for center ({}, {}) with radius {}. \
             Latitude must be within -90..90, longitude within -180..180 and the radius positive.",
            args.lat,
            args.long,
            args.radius
        );
    };

    if output.is_json() {
        return output.result(BoundsOutput {
            south: bounds.south,
            west: bounds.west,
            north: bounds.north,
            east: bounds.east,
        });
    }

    output.kv("South", bounds.south);
    output.kv("West", bounds.west);
    output.kv("North", bounds.north);
    output.kv("East", bounds.east);
    Ok(())
}
