//! Immutable dataset snapshots and the loaders that build them.
//!
//! A [`Dataset`] is built in full from one CSV load and never mutated
//! afterwards. Reloading means building a new snapshot; consumers hold a
//! reference to the snapshot they were handed.

use crate::error::{GwlError, Result};
use crate::reading::{RawRecord, Reading};
use crate::station_series::{group_counted, GroupStats, StationSeries};
use flate2::read::GzDecoder;
use log::{debug, info};
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

/// Default dataset location, relative to the working directory.
pub const DEFAULT_DATASET: &str = "data/master_data.csv";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
}

impl FromStr for DatasetSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DatasetSource::Url(s.to_string()))
        } else {
            Ok(DatasetSource::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Path(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => write!(f, "{url}"),
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Path(PathBuf::from(DEFAULT_DATASET))
    }
}

/// Readings of one load, grouped by station.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    stations: StationSeries,
    stats: GroupStats,
}

impl Dataset {
    /// Build a snapshot from raw records.
    pub fn from_records(records: &[RawRecord]) -> Dataset {
        let (stations, stats) = group_counted(records);
        Dataset { stations, stats }
    }

    /// Parse a CSV stream into a snapshot.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
        let records = RawRecord::from_csv_reader(reader)?;
        Ok(Dataset::from_records(&records))
    }

    /// Parse a CSV body, transparently inflating gzip content.
    pub fn from_csv_bytes(bytes: &[u8], label: &str) -> Result<Dataset> {
        if bytes.starts_with(&GZIP_MAGIC) {
            debug!("{label} is gzip compressed");
            let mut inflated = Vec::new();
            GzDecoder::new(bytes)
                .read_to_end(&mut inflated)
                .map_err(|source| GwlError::Decompression {
                    path: label.to_string(),
                    source,
                })?;
            return Dataset::from_csv_reader(inflated.as_slice());
        }
        Dataset::from_csv_reader(bytes)
    }

    /// Load a dataset from a file or URL.
    ///
    /// Any failure is terminal: no partial snapshot is returned.
    pub async fn load(source: &DatasetSource) -> Result<Dataset> {
        let bytes = match source {
            DatasetSource::Path(path) => std::fs::read(path)?,
            DatasetSource::Url(url) => fetch(url).await?,
        };
        let label = source.to_string();
        let dataset = Dataset::from_csv_bytes(&bytes, &label)?;
        info!(
            "Loaded {} stations from {} ({} readings kept, {} rows dropped)",
            dataset.len(),
            label,
            dataset.stats.kept,
            dataset.stats.dropped
        );
        Ok(dataset)
    }

    pub fn stations(&self) -> &StationSeries {
        &self.stations
    }

    /// Readings for one station, oldest first.
    pub fn station(&self, station_name: &str) -> Option<&[Reading]> {
        self.stations.get(station_name).map(Vec::as_slice)
    }

    pub fn contains(&self, station_name: &str) -> bool {
        self.stations.contains_key(station_name)
    }

    pub fn stats(&self) -> GroupStats {
        self.stats
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[cfg(feature = "api")]
async fn fetch(url: &str) -> Result<Vec<u8>> {
    info!("Fetching dataset from {url}");
    let response = reqwest::get(url)
        .await
        .map_err(|e| GwlError::HttpRequest(e.to_string()))?;
    if !response.status().is_success() {
        return Err(GwlError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let body = response
        .bytes()
        .await
        .map_err(|e| GwlError::HttpRequest(e.to_string()))?;
    Ok(body.to_vec())
}

#[cfg(not(feature = "api"))]
async fn fetch(url: &str) -> Result<Vec<u8>> {
    Err(GwlError::RemoteUnsupported(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Dataset, DatasetSource};
    use crate::error::GwlError;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use std::path::PathBuf;

    const CSV_DATA: &str = "\
station_name,district_name,state_name,latitude,longitude,date,currentlevel
Baramati_02,Pune,Maharashtra,18.15,74.58,2023-3-1,14.2
Baramati_02,Pune,Maharashtra,18.15,74.58,2023-1-1,12.0
Baramati_02,Pune,Maharashtra,18.15,74.58,2023-2-30,13.0
Nashik_11,Nashik,Maharashtra,,,2023-1-1,n/a
";

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gwl-core-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_source_from_str() {
        let url: DatasetSource = "https://example.org/master_data.csv".parse().unwrap();
        assert_eq!(
            url,
            DatasetSource::Url("https://example.org/master_data.csv".to_string())
        );
        let path: DatasetSource = "data/master_data.csv".parse().unwrap();
        assert_eq!(path, DatasetSource::default());
    }

    #[test]
    fn test_from_csv_bytes_plain() {
        let dataset = Dataset::from_csv_bytes(CSV_DATA.as_bytes(), "inline").unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.contains("Baramati_02"));
        assert!(!dataset.contains("Nashik_11"));
        assert_eq!(dataset.stats().kept, 2);
        assert_eq!(dataset.stats().dropped, 2);
        let readings = dataset.station("Baramati_02").unwrap();
        assert_eq!(readings[0].level, 12.0);
        assert_eq!(readings[1].level, 14.2);
    }

    #[test]
    fn test_from_csv_bytes_gzip() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(CSV_DATA.as_bytes()).unwrap();
        let compressed = encoder.finish().unwrap();
        let dataset = Dataset::from_csv_bytes(&compressed, "inline.gz").unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.station("Baramati_02").unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_gzip_is_an_error() {
        let bytes = [0x1f, 0x8b, 0x00, 0x01, 0x02];
        let result = Dataset::from_csv_bytes(&bytes, "broken.gz");
        assert!(matches!(result, Err(GwlError::Decompression { .. })));
    }

    #[test]
    fn test_header_only_is_empty() {
        let dataset = Dataset::from_csv_bytes(
            b"station_name,district_name,state_name,latitude,longitude,date,currentlevel\n",
            "inline",
        )
        .unwrap();
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_path() {
        let path = temp_path("load.csv");
        std::fs::write(&path, CSV_DATA).unwrap();
        let dataset = Dataset::load(&DatasetSource::Path(path.clone())).await.unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let path = temp_path("does-not-exist.csv");
        let result = Dataset::load(&DatasetSource::Path(path)).await;
        assert!(matches!(result, Err(GwlError::Io(_))));
    }
}
