use crate::reading::{RawRecord, Reading};
use std::collections::BTreeMap;

/// Readings grouped by station name, each group in ascending date order.
///
/// Within a group, readings that share a date keep their input order.
pub type StationSeries = BTreeMap<String, Vec<Reading>>;

/// Row accounting for a grouping pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GroupStats {
    pub kept: usize,
    pub dropped: usize,
}

/// Group raw records by station, dropping rows without a valid date and a
/// finite level, and sort each station's readings by date.
pub fn group<'a, I>(records: I) -> StationSeries
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    group_counted(records).0
}

/// Same as [`group`], also reporting how many rows were kept and dropped.
pub fn group_counted<'a, I>(records: I) -> (StationSeries, GroupStats)
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut stats = GroupStats::default();
    let mut result: StationSeries = BTreeMap::new();
    for record in records {
        match Reading::try_from(record) {
            Ok(reading) => {
                stats.kept += 1;
                result
                    .entry(record.station_name.clone())
                    .or_default()
                    .push(reading);
            }
            Err(()) => stats.dropped += 1,
        }
    }
    for readings in result.values_mut() {
        // sort_by_key is stable: same-day readings keep input order
        readings.sort_by_key(|reading| reading.date);
    }
    (result, stats)
}

/// The last reading of a station's series, if any.
pub fn most_recent(readings: &[Reading]) -> Option<&Reading> {
    readings.last()
}
