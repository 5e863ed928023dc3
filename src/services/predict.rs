//! Estimator routing: decide per record whether to trust the observed
//! optical value or substitute the regression estimate.

use crate::estimator::NdviEstimator;
use crate::models::{DailyPrediction, MergedRecord, PredictionType};

/// Classify every merged record against the cloud threshold.
///
/// Coverage at or below the threshold keeps the merged optical value and tags
/// it `actual`; coverage above it replaces the value with the estimator's
/// output on `(VH, VV)` and tags it `predicted`. The decision is per record
/// and stateless, so a single response may mix both tags and input order
/// cannot change any individual classification.
pub fn route_estimates(
    records: &[MergedRecord],
    cloud_threshold: f64,
    estimator: &dyn NdviEstimator,
) -> Vec<DailyPrediction> {
    records
        .iter()
        .map(|r| {
            let (ndvi, prediction_type) = if r.cloud_coverage_percent <= cloud_threshold {
                (r.ndvi, PredictionType::Actual)
            } else {
                (estimator.estimate(r.vh, r.vv), PredictionType::Predicted)
            };
            DailyPrediction {
                date: r.date,
                vh: r.vh,
                vv: r.vv,
                ndvi,
                cloud_coverage_percent: r.cloud_coverage_percent,
                prediction_type,
            }
        })
        .collect()
}
