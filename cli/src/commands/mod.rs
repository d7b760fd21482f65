pub mod districts;
pub mod modes;
pub mod reproject;
pub mod street;
pub mod sub_index;
pub mod walkability_map;

use anyhow::Result;
use tracing::{debug, info};
use walkability::{Dashboard, StyledMap};

use crate::cli::{Cli, MapOutput};

/// Load the dashboard from the data directory given on the command line.
pub(crate) fn load(cli: &Cli) -> Result<Dashboard> {
    let dashboard = Dashboard::load(&cli.data)?;
    debug!(districts = dashboard.districts().len(), streets = dashboard.streets().len(), crs = %dashboard.districts().crs(), "[cli] dashboard loaded");
    Ok(dashboard)
}

/// Write a styled map where requested, or print a per-category summary.
pub(crate) fn emit_map(map: &StyledMap, output: &MapOutput) -> Result<()> {
    if let Some(path) = &output.svg {
        map.to_svg(path)?;
        info!(path = %path.display(), "[map] wrote SVG preview");
    }

    match &output.output {
        Some(path) => {
            walkability::write_json(path, &map.to_geojson())?;
            info!(path = %path.display(), segments = map.segments.len(), "[map] wrote styled GeoJSON");
        }
        None => {
            println!("{}", map.title);
            for (entry, (category, count)) in map.legend.iter().zip(map.category_counts()) {
                println!("  {:<10} {:>8}  {:>13}  {count}", category.label(), entry.color, entry.range_label());
            }
        }
    }
    Ok(())
}
