use chrono::naive::NaiveDate;
use csv::ReaderBuilder;
use gwl_utils::{dates::parse_date, numbers::parse_finite};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Column names expected in the groundwater CSV header.
pub const CSV_COLUMNS: [&str; 7] = [
    "station_name",
    "district_name",
    "state_name",
    "latitude",
    "longitude",
    "date",
    "currentlevel",
];

/// One CSV row, exactly as read. Columns missing from the file are empty.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawRecord {
    pub station_name: String,
    pub district_name: String,
    pub state_name: String,
    pub latitude: String,
    pub longitude: String,
    /// "YYYY-M-D"
    pub date: String,
    /// Depth to water, in meters
    pub currentlevel: String,
}

impl RawRecord {
    /// Parse a CSV stream with a header row into raw records.
    ///
    /// Columns are located by header name. Blank lines are skipped, short
    /// rows leave their trailing columns empty, and records the CSV reader
    /// cannot decode are dropped the same way invalid readings are. Only a
    /// failure to read the header row is an error.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>, csv::Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let index: Vec<Option<usize>> = CSV_COLUMNS
            .iter()
            .map(|column| {
                let position = headers.iter().position(|h| h == *column);
                if position.is_none() {
                    debug!("CSV header is missing column {column}");
                }
                position
            })
            .collect();
        let mut records = Vec::new();
        for (line, row) in rdr.records().enumerate() {
            let record = match row {
                Ok(r) => r,
                Err(e) => {
                    debug!("skipping record {}: {}", line + 1, e);
                    continue;
                }
            };
            let field = |column: usize| -> String {
                index[column]
                    .and_then(|i| record.get(i))
                    .unwrap_or("")
                    .to_string()
            };
            records.push(RawRecord {
                station_name: field(0),
                district_name: field(1),
                state_name: field(2),
                latitude: field(3),
                longitude: field(4),
                date: field(5),
                currentlevel: field(6),
            });
        }
        Ok(records)
    }

    /// Parse a CSV string with a header row into raw records.
    pub fn from_csv_str(csv_object: &str) -> Result<Vec<RawRecord>, csv::Error> {
        RawRecord::from_csv_reader(csv_object.as_bytes())
    }
}

/// A single dated water level observation for a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub station_name: String,
    pub district_name: String,
    pub state_name: String,
    /// Decimal degrees, absent when the column does not hold a finite number
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: NaiveDate,
    pub level: f64,
}

impl Reading {
    /// Both coordinates, if the reading has them.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

impl TryFrom<&RawRecord> for Reading {
    type Error = ();

    fn try_from(value: &RawRecord) -> Result<Self, Self::Error> {
        let date = parse_date(&value.date).map_err(|_| ())?;
        let level = parse_finite(&value.currentlevel).ok_or(())?;
        Ok(Reading {
            station_name: value.station_name.clone(),
            district_name: value.district_name.clone(),
            state_name: value.state_name.clone(),
            latitude: parse_finite(&value.latitude),
            longitude: parse_finite(&value.longitude),
            date,
            level,
        })
    }
}

impl TryFrom<RawRecord> for Reading {
    type Error = ();

    fn try_from(value: RawRecord) -> Result<Self, Self::Error> {
        Reading::try_from(&value)
    }
}
