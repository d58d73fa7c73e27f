//! Data processing for groundwater station series.
//!
//! This crate turns grouped readings into the views a dashboard shows:
//! trend predictions, station summaries, search results, map markers and
//! reading history.

pub mod map;
pub mod summary;
pub mod trend;

/// Alert threshold for predicted levels.
pub mod alert {
    use crate::trend::{Horizon, Prediction};

    /// Predicted depth to water (meters) above which a station is flagged.
    pub const DEFAULT_ALERT_THRESHOLD: f64 = 30.0;

    /// Alerts are always judged on the one-year prediction, whatever
    /// horizon is being displayed.
    pub const ALERT_HORIZON: Horizon = Horizon::Year;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct AlertPolicy {
        pub threshold: f64,
    }

    impl Default for AlertPolicy {
        fn default() -> Self {
            AlertPolicy {
                threshold: DEFAULT_ALERT_THRESHOLD,
            }
        }
    }

    impl AlertPolicy {
        pub fn new(threshold: f64) -> Self {
            AlertPolicy { threshold }
        }

        /// True if the prediction is available and strictly above the threshold.
        pub fn is_critical(&self, prediction: &Prediction) -> bool {
            prediction.level().is_some_and(|level| level > self.threshold)
        }
    }

}

/// Station search over an already grouped mapping.
pub mod search {
    use gwl_core::station_series::StationSeries;

    /// Shortest search term that filters; shorter terms show every station.
    pub const MIN_SEARCH_LEN: usize = 3;

    /// Stations whose name or district contains `term`, ignoring case.
    ///
    /// Names are taken from each station's first reading. A term shorter
    /// than `min_len` characters returns the whole mapping.
    pub fn filter(stations: &StationSeries, term: &str, min_len: usize) -> StationSeries {
        let term = term.to_lowercase();
        if term.chars().count() < min_len {
            return stations.clone();
        }
        stations
            .iter()
            .filter(|(_, readings)| {
                readings.first().is_some_and(|first| {
                    first.station_name.to_lowercase().contains(&term)
                        || first.district_name.to_lowercase().contains(&term)
                })
            })
            .map(|(name, readings)| (name.clone(), readings.clone()))
            .collect()
    }

}

/// Full reading history for one station.
pub mod history {
    use chrono::NaiveDate;
    use gwl_core::reading::Reading;
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct HistoryRow {
        pub date: NaiveDate,
        pub level: f64,
    }

    pub fn title(station_name: &str) -> String {
        format!("Historical Data for {station_name}")
    }

    /// Oldest first, as stored in the series.
    pub fn history(readings: &[Reading]) -> Vec<HistoryRow> {
        readings
            .iter()
            .map(|reading| HistoryRow {
                date: reading.date,
                level: reading.level,
            })
            .collect()
    }

}
