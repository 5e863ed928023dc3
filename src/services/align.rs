//! Radar band alignment: inner-join VH and VV by acquisition date.

use crate::models::{BandSample, RadarRecord};
use crate::services::error::{PipelineError, PipelineResult};

/// Inner-join the two radar band series on exact date equality.
///
/// Produces one [`RadarRecord`] per date present in both bands, sorted by
/// date. Dates observed in only one band are dropped; the drop count is
/// logged as a diagnostic. An empty intersection is an explicit error with
/// per-band row counts rather than a silent empty result, so the client can
/// tell a date mismatch apart from a legitimately sparse response.
pub fn align_radar_bands(
    vh: &[BandSample],
    vv: &[BandSample],
) -> PipelineResult<Vec<RadarRecord>> {
    let mut vh_sorted = vh.to_vec();
    let mut vv_sorted = vv.to_vec();
    vh_sorted.sort_by_key(|s| s.date);
    vv_sorted.sort_by_key(|s| s.date);

    // Sorted-merge join: both cursors only ever advance.
    let mut records = Vec::with_capacity(vh_sorted.len().min(vv_sorted.len()));
    let (mut i, mut j) = (0, 0);
    while i < vh_sorted.len() && j < vv_sorted.len() {
        match vh_sorted[i].date.cmp(&vv_sorted[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                records.push(RadarRecord {
                    date: vh_sorted[i].date,
                    vh: vh_sorted[i].mean,
                    vv: vv_sorted[j].mean,
                });
                i += 1;
                j += 1;
            }
        }
    }

    if records.is_empty() {
        return Err(PipelineError::EmptyJoin {
            vh_rows: vh.len(),
            vv_rows: vv.len(),
        });
    }

    let dropped = (vh.len() - records.len()) + (vv.len() - records.len());
    if dropped > 0 {
        log::warn!(
            "radar alignment dropped {} single-band rows ({} common dates)",
            dropped,
            records.len()
        );
    }

    Ok(records)
}
