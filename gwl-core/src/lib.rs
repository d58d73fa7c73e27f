//! Core types for groundwater level readings.
//!
//! - `reading`: raw CSV rows and validated readings
//! - `station_series`: grouping readings into per-station chronological series
//! - `dataset`: immutable snapshots and the file/URL loaders that build them

pub mod dataset;
pub mod error;
pub mod reading;
pub mod station_series;
