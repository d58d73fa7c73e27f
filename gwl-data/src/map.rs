//! Map markers built from each station's most recent reading.

use chrono::NaiveDate;
use gwl_core::station_series::{most_recent, StationSeries};
use gwl_utils::dates::format_date;
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

/// A point marker for one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub station_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub level: f64,
    pub date: NaiveDate,
}

impl MapMarker {
    /// Popup text, e.g. "<b>Kolar_3</b><br>Level: 12.4m"
    pub fn popup(&self) -> String {
        format!("<b>{}</b><br>Level: {}m", self.station_name, self.level)
    }
}

/// One marker per station whose latest reading has both coordinates.
///
/// Stations without coordinates are left off the map only; they are still
/// part of the series.
pub fn markers(stations: &StationSeries) -> Vec<MapMarker> {
    stations
        .iter()
        .filter_map(|(name, readings)| {
            let latest = most_recent(readings)?;
            let Some((latitude, longitude)) = latest.coordinates() else {
                debug!("{name} has no coordinates, leaving it off the map");
                return None;
            };
            Some(MapMarker {
                station_name: name.clone(),
                latitude,
                longitude,
                level: latest.level,
                date: latest.date,
            })
        })
        .collect()
}

/// Markers as a GeoJSON FeatureCollection. GeoJSON orders positions as
/// [longitude, latitude].
pub fn to_geojson(markers: &[MapMarker]) -> Value {
    let features: Vec<Value> = markers
        .iter()
        .map(|marker| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.longitude, marker.latitude],
                },
                "properties": {
                    "station_name": marker.station_name,
                    "level": marker.level,
                    "date": format_date(&marker.date),
                    "popup": marker.popup(),
                },
            })
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
