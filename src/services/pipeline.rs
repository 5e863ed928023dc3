//! End-to-end pipeline orchestration.

use crate::estimator::NdviEstimator;
use crate::models::{BandSample, DailyPrediction, OpticalSample};
use crate::services::error::PipelineResult;
use crate::services::{align, interpolate, merge, predict};

/// Default maximum allowable cloud coverage percentage.
pub const DEFAULT_CLOUD_THRESHOLD: f64 = 20.0;

/// Run the full fusion pipeline over one uploaded batch of series.
///
/// Stages, in dependency order: align the radar bands (inner join on date),
/// gap-fill the optical series onto a daily grid, merge by nearest date, then
/// route every record to its observed or estimated NDVI value.
///
/// The function is pure apart from log output: identical inputs and threshold
/// always produce identical output, and nothing outside the arguments is
/// read or mutated.
pub fn run_pipeline(
    vh: &[BandSample],
    vv: &[BandSample],
    optical: &[OpticalSample],
    cloud_threshold: f64,
    estimator: &dyn NdviEstimator,
) -> PipelineResult<Vec<DailyPrediction>> {
    let radar = align::align_radar_bands(vh, vv)?;
    let daily_optical = interpolate::daily_optical_series(optical, cloud_threshold)?;
    let merged = merge::merge_nearest(&radar, &daily_optical, optical);
    Ok(predict::route_estimates(&merged, cloud_threshold, estimator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::LinearNdviModel;
    use crate::models::PredictionType;
    use crate::services::error::PipelineError;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn band(s: &str, mean: f64) -> BandSample {
        BandSample::new(date(s), mean)
    }

    fn optical(s: &str, mean: f64, cloud: f64) -> OpticalSample {
        OpticalSample::new(date(s), mean, cloud)
    }

    // The reference scenario: one clear day, one cloudy day.
    #[test]
    fn test_mixed_actual_and_predicted() {
        let vh = vec![band("2024-01-01", 10.0), band("2024-01-03", 12.0)];
        let vv = vec![band("2024-01-01", 5.0), band("2024-01-03", 6.0)];
        let ndvi = vec![
            optical("2024-01-01", 0.3, 10.0),
            optical("2024-01-03", 0.5, 90.0),
        ];
        let estimator = LinearNdviModel::new("test", 0.0, 0.01, 0.05);

        let out = run_pipeline(&vh, &vv, &ndvi, 20.0, &estimator).unwrap();
        assert_eq!(out.len(), 2);

        assert_eq!(out[0].date, date("2024-01-01"));
        assert_eq!(out[0].prediction_type, PredictionType::Actual);
        assert_eq!(out[0].ndvi, 0.3);

        assert_eq!(out[1].date, date("2024-01-03"));
        assert_eq!(out[1].prediction_type, PredictionType::Predicted);
        let expected = estimator_output(12.0, 6.0);
        assert!((out[1].ndvi - expected).abs() < 1e-12);
    }

    fn estimator_output(vh: f64, vv: f64) -> f64 {
        0.01 * vh + 0.05 * vv
    }

    #[test]
    fn test_all_cloudy_fails_with_no_partial_result() {
        let vh = vec![band("2024-01-01", 10.0)];
        let vv = vec![band("2024-01-01", 5.0)];
        let ndvi = vec![
            optical("2024-01-01", 0.3, 100.0),
            optical("2024-01-02", 0.4, 100.0),
        ];
        let estimator = LinearNdviModel::new("test", 0.0, 0.0, 0.0);

        let err = run_pipeline(&vh, &vv, &ndvi, 20.0, &estimator).unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientData { .. }));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let vh = vec![
            band("2024-01-01", 10.0),
            band("2024-01-04", 11.0),
            band("2024-01-07", 12.0),
        ];
        let vv = vec![
            band("2024-01-01", 5.0),
            band("2024-01-04", 5.5),
            band("2024-01-07", 6.0),
        ];
        let ndvi = vec![
            optical("2024-01-01", 0.3, 5.0),
            optical("2024-01-04", 0.4, 50.0),
            optical("2024-01-07", 0.5, 15.0),
        ];
        let estimator = LinearNdviModel::new("test", 0.02, 0.01, 0.03);

        let first = run_pipeline(&vh, &vv, &ndvi, 20.0, &estimator).unwrap();
        let second = run_pipeline(&vh, &vv, &ndvi, 20.0, &estimator).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_threshold_partition_over_full_output() {
        let vh: Vec<BandSample> = (1..=9).map(|d| band(&format!("2024-01-0{}", d), d as f64)).collect();
        let vv: Vec<BandSample> = (1..=9).map(|d| band(&format!("2024-01-0{}", d), d as f64 / 2.0)).collect();
        let ndvi = vec![
            optical("2024-01-01", 0.1, 0.0),
            optical("2024-01-03", 0.2, 30.0),
            optical("2024-01-05", 0.3, 60.0),
            optical("2024-01-07", 0.4, 10.0),
            optical("2024-01-09", 0.5, 20.0),
        ];
        let estimator = LinearNdviModel::new("test", 0.0, 0.01, 0.01);

        let out = run_pipeline(&vh, &vv, &ndvi, 20.0, &estimator).unwrap();
        assert_eq!(out.len(), 9);
        for record in &out {
            if record.cloud_coverage_percent <= 20.0 {
                assert_eq!(record.prediction_type, PredictionType::Actual);
            } else {
                assert_eq!(record.prediction_type, PredictionType::Predicted);
            }
        }
    }
}
