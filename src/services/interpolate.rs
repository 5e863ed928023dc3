//! Gap filling: interpolate the cloud-acceptable optical samples onto a
//! daily grid.

use chrono::NaiveDate;

use crate::models::{BandSample, OpticalSample};
use crate::services::error::{PipelineError, PipelineResult};

/// A 1-D piecewise-linear interpolant with linear extrapolation beyond the
/// knot range (the counterpart of scipy's `interp1d(..., kind="linear",
/// fill_value="extrapolate")`).
///
/// Knots must be sorted by x with strictly increasing abscissae; the unique
/// date invariant upstream guarantees this.
#[derive(Debug, Clone)]
pub struct LinearInterpolant {
    knots: Vec<(f64, f64)>,
}

impl LinearInterpolant {
    /// Build an interpolant from `(x, y)` knots. Knots are sorted internally.
    /// At least one knot is required; a single knot yields a constant.
    pub fn new(mut knots: Vec<(f64, f64)>) -> Self {
        knots.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        Self { knots }
    }

    /// Evaluate at `x`. Exact at knots; linear between them; extrapolated
    /// from the nearest end segment outside the knot range.
    pub fn eval(&self, x: f64) -> f64 {
        let knots = &self.knots;
        if knots.len() == 1 {
            return knots[0].1;
        }

        // Exact hit: return the sample value untouched.
        if let Ok(idx) = knots.binary_search_by(|k| {
            k.0.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)
        }) {
            return knots[idx].1;
        }

        // Segment selection, clamped to the end segments for extrapolation.
        let upper = knots.partition_point(|k| k.0 < x);
        let seg = upper.clamp(1, knots.len() - 1);
        let (x0, y0) = knots[seg - 1];
        let (x1, y1) = knots[seg];
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}

/// Days since the Common Era, used as the interpolation abscissa. Any affine
/// transform of time works; days keep the numbers small.
fn epoch_days(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date.num_days_from_ce() as f64
}

/// Filter the optical series by cloud coverage and resample it onto a daily
/// grid via linear interpolation.
///
/// Only samples with `cloud_coverage_percent <= cloud_threshold` contribute
/// knots. The output grid covers every calendar day from the earliest to the
/// latest retained sample, inclusive, and never extends beyond that range.
/// Fails with [`PipelineError::InsufficientData`] when the filter removes
/// every sample.
pub fn daily_optical_series(
    optical: &[OpticalSample],
    cloud_threshold: f64,
) -> PipelineResult<Vec<BandSample>> {
    let mut filtered: Vec<&OpticalSample> = optical
        .iter()
        .filter(|s| s.cloud_coverage_percent <= cloud_threshold)
        .collect();

    if filtered.is_empty() {
        return Err(PipelineError::InsufficientData {
            threshold: cloud_threshold,
            total: optical.len(),
        });
    }
    filtered.sort_by_key(|s| s.date);

    log::debug!(
        "gap filling over {} of {} optical samples (cloud threshold {}%)",
        filtered.len(),
        optical.len(),
        cloud_threshold
    );

    let interpolant = LinearInterpolant::new(
        filtered
            .iter()
            .map(|s| (epoch_days(s.date), s.mean))
            .collect(),
    );

    let start = filtered[0].date;
    let end = filtered[filtered.len() - 1].date;

    let mut daily = Vec::new();
    let mut day = start;
    while day <= end {
        daily.push(BandSample::new(day, interpolant.eval(epoch_days(day))));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    Ok(daily)
}
