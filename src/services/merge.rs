//! Temporal merge: attach optical values and cloud coverage to the radar
//! table by nearest-date matching.
//!
//! Radar and optical passes rarely land on the same calendar date, so exact
//! joins would discard most rows. The radar table drives the join; the NDVI
//! value comes from the interpolated daily series, while the cloud coverage
//! comes from the nearest *actual* optical observation. A linearly smoothed
//! cloud percentage would be meaningless.

use chrono::NaiveDate;

use crate::models::{BandSample, MergedRecord, OpticalSample, RadarRecord};

/// Left-join the radar table against the daily optical series and the
/// unfiltered optical observations, both by nearest date.
///
/// Returns one record per radar row, sorted by date. An empty radar table
/// yields an empty result. Inputs are never mutated; lookups run in
/// O(n log n) via binary search over sorted date vectors.
pub fn merge_nearest(
    radar: &[RadarRecord],
    daily_optical: &[BandSample],
    optical: &[OpticalSample],
) -> Vec<MergedRecord> {
    if radar.is_empty() || daily_optical.is_empty() || optical.is_empty() {
        return Vec::new();
    }

    let mut radar_sorted = radar.to_vec();
    radar_sorted.sort_by_key(|r| r.date);

    let mut daily_sorted = daily_optical.to_vec();
    daily_sorted.sort_by_key(|s| s.date);
    let daily_dates: Vec<NaiveDate> = daily_sorted.iter().map(|s| s.date).collect();

    let mut optical_sorted = optical.to_vec();
    optical_sorted.sort_by_key(|s| s.date);
    let optical_dates: Vec<NaiveDate> = optical_sorted.iter().map(|s| s.date).collect();

    radar_sorted
        .iter()
        .map(|r| {
            let ndvi = daily_sorted[nearest_idx(&daily_dates, r.date)].mean;
            let cloud =
                optical_sorted[nearest_idx(&optical_dates, r.date)].cloud_coverage_percent;
            MergedRecord {
                date: r.date,
                vh: r.vh,
                vv: r.vv,
                ndvi,
                cloud_coverage_percent: cloud,
            }
        })
        .collect()
}

/// Index of the date closest to `target` in a sorted, non-empty slice.
/// Ties between the two neighbors resolve to the earlier date.
fn nearest_idx(dates: &[NaiveDate], target: NaiveDate) -> usize {
    let upper = dates.partition_point(|d| *d < target);
    if upper == 0 {
        return 0;
    }
    if upper == dates.len() {
        return dates.len() - 1;
    }

    let before = (target - dates[upper - 1]).num_days();
    let after = (dates[upper] - target).num_days();
    if after < before {
        upper
    } else {
        upper - 1
    }
}
