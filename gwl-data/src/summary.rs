//! Per-station summaries: the latest reading plus a trend prediction.

use crate::alert::{AlertPolicy, ALERT_HORIZON};
use crate::trend::{predict, Horizon, Prediction};
use chrono::NaiveDate;
use gwl_core::reading::Reading;
use gwl_core::station_series::{most_recent, StationSeries};
use serde::Serialize;

/// What a station card shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub station_name: String,
    pub district_name: String,
    pub state_name: String,
    pub latest_date: NaiveDate,
    pub latest_level: f64,
    pub reading_count: usize,
    pub horizon: String,
    pub horizon_days: i64,
    pub prediction: Prediction,
    /// One-year predicted level is above the alert threshold
    pub alert: bool,
    pub map_link: Option<String>,
}

impl StationSummary {
    /// Summarize one station. `None` if it has no readings.
    pub fn from_readings(
        station_name: &str,
        readings: &[Reading],
        horizon: Horizon,
        policy: &AlertPolicy,
    ) -> Option<StationSummary> {
        let latest = most_recent(readings)?;
        let prediction = predict(readings, horizon.days());
        Some(StationSummary {
            station_name: station_name.to_string(),
            district_name: latest.district_name.clone(),
            state_name: latest.state_name.clone(),
            latest_date: latest.date,
            latest_level: latest.level,
            reading_count: readings.len(),
            horizon: horizon.label(),
            horizon_days: horizon.days(),
            prediction,
            alert: policy.is_critical(&predict(readings, ALERT_HORIZON.days())),
            map_link: latest.coordinates().map(|(lat, lon)| map_link(lat, lon)),
        })
    }
}

/// Google Maps link for a coordinate pair.
pub fn map_link(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={latitude},{longitude}")
}

/// Summaries for every station, in station name order.
pub fn summarize(
    stations: &StationSeries,
    horizon: Horizon,
    policy: &AlertPolicy,
) -> Vec<StationSummary> {
    stations
        .iter()
        .filter_map(|(name, readings)| {
            StationSummary::from_readings(name, readings, horizon, policy)
        })
        .collect()
}
