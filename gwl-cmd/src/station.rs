//! Single-station commands: prediction and reading history.

use anyhow::bail;
use gwl_core::dataset::Dataset;
use gwl_core::reading::Reading;
use gwl_data::history::{history, title};
use gwl_data::trend::{predict, Horizon, TrendLine};
use gwl_utils::dates::format_date;
use std::io::Write;

/// Readings for `station_name`, or an error naming the missing station.
///
/// Prediction assumes the station exists, so every lookup goes through here.
pub fn lookup<'a>(dataset: &'a Dataset, station_name: &str) -> anyhow::Result<&'a [Reading]> {
    match dataset.station(station_name) {
        Some(readings) => Ok(readings),
        None => bail!("Station not found: {station_name}"),
    }
}

pub fn run_predict<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    station_name: &str,
    horizon: Horizon,
) -> anyhow::Result<()> {
    let readings = lookup(dataset, station_name)?;
    let prediction = predict(readings, horizon.days());
    writeln!(
        out,
        "Predicted Level ({}) for {}: {}",
        horizon, station_name, prediction
    )?;
    match TrendLine::fit(readings) {
        Some(line) => writeln!(
            out,
            "Trend: {:+.4} per day over {} readings",
            line.slope,
            readings.len()
        )?,
        None => writeln!(out, "Trend: N/A ({} readings)", readings.len())?,
    }
    Ok(())
}

pub fn run_history<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    station_name: &str,
    json: bool,
) -> anyhow::Result<()> {
    let readings = lookup(dataset, station_name)?;
    let rows = history(readings);
    if json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "{}", title(station_name))?;
    writeln!(out, "{:<12} Water Level (m)", "Date")?;
    for row in &rows {
        writeln!(out, "{:<12} {}", format_date(&row.date), row.level)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_DATA: &str = "\
station_name,district_name,state_name,latitude,longitude,date,currentlevel
S1,Ludhiana,Punjab,30.9,75.85,2023-01-11,20
S1,Ludhiana,Punjab,30.9,75.85,2023-01-01,10
S2,Ludhiana,Punjab,30.9,75.85,2023-01-01,7
S3,Bathinda,Punjab,30.2,74.95,2023-01-01,3
S3,Bathinda,Punjab,30.2,74.95,2023-01-01,8
";

    fn dataset() -> Dataset {
        Dataset::from_csv_bytes(CSV_DATA.as_bytes(), "inline").unwrap()
    }

    fn output<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_predict_known_trend() {
        let data = dataset();
        let text = output(|out| run_predict(out, &data, "S1", Horizon::Days(10)));
        assert!(text.contains("Predicted Level (10 days) for S1: 30.00"));
        assert!(text.contains("Trend: +1.0000 per day over 2 readings"));
    }

    #[test]
    fn test_predict_unavailable() {
        let data = dataset();
        let single = output(|out| run_predict(out, &data, "S2", Horizon::Year));
        assert!(single.contains("Predicted Level (Year) for S2: N/A"));
        assert!(single.contains("Trend: N/A (1 readings)"));

        let same_day = output(|out| run_predict(out, &data, "S3", Horizon::Month));
        assert!(same_day.contains("for S3: N/A"));
    }

    #[test]
    fn test_unknown_station_is_an_error() {
        let data = dataset();
        let mut out = Vec::new();
        let err = run_predict(&mut out, &data, "S9", Horizon::Week).unwrap_err();
        assert_eq!(err.to_string(), "Station not found: S9");
        assert!(run_history(&mut out, &data, "S9", false).is_err());
    }

    #[test]
    fn test_history_table() {
        let data = dataset();
        let text = output(|out| run_history(out, &data, "S1", false));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Historical Data for S1");
        assert!(lines[2].starts_with("2023-01-01"));
        assert!(lines[3].starts_with("2023-01-11"));
        assert!(lines[3].ends_with("20"));
    }

    #[test]
    fn test_history_json() {
        let data = dataset();
        let text = output(|out| run_history(out, &data, "S3", true));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["level"], 3.0);
        assert_eq!(value[1]["level"], 8.0);
        assert_eq!(value[0]["date"], "2023-01-01");
    }
}
