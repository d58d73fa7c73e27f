//! GeoJSON export of station markers.

use gwl_core::dataset::Dataset;
use gwl_data::map::{markers, to_geojson};
use log::info;

/// Render the dataset's markers as pretty-printed GeoJSON.
pub fn render_map(dataset: &Dataset) -> anyhow::Result<String> {
    let markers = markers(dataset.stations());
    info!(
        "{} of {} stations placed on the map",
        markers.len(),
        dataset.len()
    );
    Ok(serde_json::to_string_pretty(&to_geojson(&markers))?)
}

/// Write the map to `output`, or to stdout when no path is given.
pub async fn run_map(dataset: &Dataset, output: Option<&str>) -> anyhow::Result<()> {
    let geojson = render_map(dataset)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, geojson).await?;
            info!("Map written to {path}");
        }
        None => println!("{geojson}"),
    }
    Ok(())
}
