//! Station summary listing, with optional search.

use crate::config::DashboardConfig;
use gwl_core::dataset::Dataset;
use gwl_data::search::filter;
use gwl_data::summary::{summarize, StationSummary};
use gwl_data::trend::Horizon;
use gwl_utils::dates::format_date;
use log::info;
use std::io::Write;

pub const NO_STATIONS: &str = "No stations found.";
pub const ALERT_BANNER: &str = "ALERT: Level predicted to be CRITICAL";

/// Summaries for the dataset, restricted to stations matching `search`.
pub fn station_summaries(
    dataset: &Dataset,
    config: &DashboardConfig,
    horizon: Horizon,
    search: Option<&str>,
) -> Vec<StationSummary> {
    let policy = config.alert_policy();
    match search {
        Some(term) => {
            let matching = filter(dataset.stations(), term, config.min_search_len);
            info!("{} of {} stations match {:?}", matching.len(), dataset.len(), term);
            summarize(&matching, horizon, &policy)
        }
        None => summarize(dataset.stations(), horizon, &policy),
    }
}

/// Write station cards as plain text.
pub fn write_summaries<W: Write>(out: &mut W, summaries: &[StationSummary]) -> std::io::Result<()> {
    if summaries.is_empty() {
        writeln!(out, "{NO_STATIONS}")?;
        return Ok(());
    }
    for summary in summaries {
        if summary.alert {
            writeln!(out, "{ALERT_BANNER}")?;
        }
        writeln!(
            out,
            "{} ({}, {})",
            summary.station_name, summary.district_name, summary.state_name
        )?;
        writeln!(
            out,
            "  Most Recent Level: {:.2} ({})",
            summary.latest_level,
            format_date(&summary.latest_date)
        )?;
        writeln!(
            out,
            "  Predicted Level ({}): {}",
            summary.horizon, summary.prediction
        )?;
        if let Some(link) = &summary.map_link {
            writeln!(out, "  Map: {link}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Run the summary command against a loaded dataset.
pub fn run_summary<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    config: &DashboardConfig,
    horizon: Horizon,
    search: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let summaries = station_summaries(dataset, config, horizon, search);
    let alerts = summaries.iter().filter(|s| s.alert).count();
    info!("{} stations summarized, {} alerts", summaries.len(), alerts);
    if json {
        serde_json::to_writer_pretty(&mut *out, &summaries)?;
        writeln!(out)?;
    } else {
        write_summaries(out, &summaries)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_DATA: &str = "\
station_name,district_name,state_name,latitude,longitude,date,currentlevel
Bhuj_5,Kachchh,Gujarat,23.25,69.67,2023-01-01,10
Bhuj_5,Kachchh,Gujarat,23.25,69.67,2023-01-11,20
Rajkot_2,Rajkot,Gujarat,,,2023-01-01,4
";

    fn dataset() -> Dataset {
        Dataset::from_csv_bytes(CSV_DATA.as_bytes(), "inline").unwrap()
    }

    #[test]
    fn test_text_cards() {
        let mut out = Vec::new();
        run_summary(
            &mut out,
            &dataset(),
            &DashboardConfig::default(),
            Horizon::Week,
            None,
            false,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(ALERT_BANNER));
        assert_eq!(text.matches(ALERT_BANNER).count(), 1);
        assert!(text.contains("Bhuj_5 (Kachchh, Gujarat)"));
        assert!(text.contains("Most Recent Level: 20.00 (2023-01-11)"));
        assert!(text.contains("Predicted Level (Week): 27.00"));
        assert!(text.contains("Map: https://www.google.com/maps?q=23.25,69.67"));
        assert!(text.contains("Predicted Level (Week): N/A"));
    }

    #[test]
    fn test_alert_banner_for_year() {
        let mut out = Vec::new();
        let config = DashboardConfig::default();
        run_summary(&mut out, &dataset(), &config, Horizon::Year, None, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(ALERT_BANNER));
        assert!(text.contains("Predicted Level (Year): 385.00"));
    }

    #[test]
    fn test_search_without_match() {
        let mut out = Vec::new();
        run_summary(
            &mut out,
            &dataset(),
            &DashboardConfig::default(),
            Horizon::Year,
            Some("Surat"),
            false,
        )
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), NO_STATIONS);
    }

    #[test]
    fn test_threshold_from_config() {
        let config = DashboardConfig {
            alert_threshold: 1000.0,
            ..Default::default()
        };
        let summaries = station_summaries(&dataset(), &config, Horizon::Year, Some("bhuj"));
        assert_eq!(summaries.len(), 1);
        assert!(!summaries[0].alert);
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        run_summary(
            &mut out,
            &dataset(),
            &DashboardConfig::default(),
            Horizon::Days(10),
            Some("rajkot"),
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["station_name"], "Rajkot_2");
        assert!(value[0]["prediction"].is_null());
        assert!(value[0]["map_link"].is_null());
    }
}
