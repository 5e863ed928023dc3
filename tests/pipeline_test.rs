//! End-to-end pipeline tests: CSV bytes in, daily prediction records out.

use chrono::NaiveDate;
use ndvi_rust::estimator::LinearNdviModel;
use ndvi_rust::models::PredictionType;
use ndvi_rust::parsing::{read_optical_csv, read_radar_csv};
use ndvi_rust::services::{run_pipeline, PipelineError, DEFAULT_CLOUD_THRESHOLD};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn run(
    vh_csv: &[u8],
    vv_csv: &[u8],
    ndvi_csv: &[u8],
    threshold: f64,
    model: &LinearNdviModel,
) -> Result<Vec<ndvi_rust::models::DailyPrediction>, PipelineError> {
    let vh = read_radar_csv("vh", vh_csv)?;
    let vv = read_radar_csv("vv", vv_csv)?;
    let ndvi = read_optical_csv("ndvi", ndvi_csv)?;
    run_pipeline(&vh, &vv, &ndvi, threshold, model)
}

#[test]
fn reference_scenario_mixes_actual_and_predicted() {
    let vh_csv = b"date,mean\n2024-01-01,10\n2024-01-03,12\n";
    let vv_csv = b"date,mean\n2024-01-01,5\n2024-01-03,6\n";
    let ndvi_csv =
        b"date,mean,cloudCoveragePercent\n2024-01-01,0.3,10\n2024-01-03,0.5,90\n";
    let model = LinearNdviModel::new("test", 0.05, 0.02, -0.01);

    let out = run(vh_csv, vv_csv, ndvi_csv, 20.0, &model).unwrap();
    assert_eq!(out.len(), 2);

    assert_eq!(out[0].date, date("2024-01-01"));
    assert_eq!(out[0].prediction_type, PredictionType::Actual);
    assert_eq!(out[0].ndvi, 0.3);

    assert_eq!(out[1].date, date("2024-01-03"));
    assert_eq!(out[1].prediction_type, PredictionType::Predicted);
    // Estimator(VH=12, VV=6) with the fitted parameters above.
    let expected = 0.05 + 0.02 * 12.0 - 0.01 * 6.0;
    assert!((out[1].ndvi - expected).abs() < 1e-12);
}

#[test]
fn fully_clouded_optical_series_is_rejected_outright() {
    let vh_csv = b"date,mean\n2024-01-01,10\n";
    let vv_csv = b"date,mean\n2024-01-01,5\n";
    let ndvi_csv =
        b"date,mean,cloudCoveragePercent\n2024-01-01,0.3,100\n2024-01-02,0.4,100\n";
    let model = LinearNdviModel::new("test", 0.0, 0.0, 0.0);

    let err = run(vh_csv, vv_csv, ndvi_csv, 20.0, &model).unwrap_err();
    assert!(matches!(err, PipelineError::InsufficientData { .. }));
}

#[test]
fn missing_columns_are_reported_by_name() {
    let bad_vh = b"day,value\n2024-01-01,10\n";
    let err = read_radar_csv("vh", bad_vh).unwrap_err();
    match err {
        PipelineError::Schema { input, missing } => {
            assert_eq!(input, "vh");
            assert_eq!(missing, vec!["date".to_string(), "mean".to_string()]);
        }
        other => panic!("expected Schema error, got {:?}", other),
    }
}

#[test]
fn output_dates_stay_within_radar_range_and_partition_cleanly() {
    let vh_csv = b"date,mean\n\
        2024-03-01,9.0\n2024-03-04,9.5\n2024-03-07,10.0\n2024-03-10,10.5\n";
    let vv_csv = b"date,mean\n\
        2024-03-01,4.0\n2024-03-04,4.2\n2024-03-07,4.4\n2024-03-10,4.6\n";
    let ndvi_csv = b"date,mean,cloudCoveragePercent\n\
        2024-03-01,0.20,5\n2024-03-05,0.35,80\n2024-03-09,0.50,12\n";
    let model = LinearNdviModel::new("test", 0.1, 0.01, 0.02);

    let out = run(vh_csv, vv_csv, ndvi_csv, DEFAULT_CLOUD_THRESHOLD, &model).unwrap();

    // One row per radar date, none dropped, none invented.
    let dates: Vec<NaiveDate> = out.iter().map(|r| r.date).collect();
    assert_eq!(
        dates,
        vec![
            date("2024-03-01"),
            date("2024-03-04"),
            date("2024-03-07"),
            date("2024-03-10")
        ]
    );

    // Threshold partition: actual iff coverage <= threshold, no third state.
    for record in &out {
        match record.prediction_type {
            PredictionType::Actual => {
                assert!(record.cloud_coverage_percent <= DEFAULT_CLOUD_THRESHOLD)
            }
            PredictionType::Predicted => {
                assert!(record.cloud_coverage_percent > DEFAULT_CLOUD_THRESHOLD)
            }
        }
    }
}

#[test]
fn interpolated_values_are_exact_at_clear_sample_dates() {
    let vh_csv = b"date,mean\n2024-03-01,9.0\n2024-03-09,10.0\n";
    let vv_csv = b"date,mean\n2024-03-01,4.0\n2024-03-09,4.5\n";
    let ndvi_csv = b"date,mean,cloudCoveragePercent\n\
        2024-03-01,0.20,5\n2024-03-09,0.50,12\n";
    let model = LinearNdviModel::new("test", 0.0, 0.0, 0.0);

    let out = run(vh_csv, vv_csv, ndvi_csv, 20.0, &model).unwrap();
    assert_eq!(out[0].ndvi, 0.20);
    assert_eq!(out[1].ndvi, 0.50);
}

#[test]
fn disjoint_radar_bands_error_with_row_counts() {
    let vh_csv = b"date,mean\n2024-01-01,10\n2024-01-02,11\n";
    let vv_csv = b"date,mean\n2024-02-01,5\n";
    let ndvi_csv = b"date,mean,cloudCoveragePercent\n2024-01-01,0.3,10\n";
    let model = LinearNdviModel::new("test", 0.0, 0.0, 0.0);

    let err = run(vh_csv, vv_csv, ndvi_csv, 20.0, &model).unwrap_err();
    match err {
        PipelineError::EmptyJoin { vh_rows, vv_rows } => {
            assert_eq!(vh_rows, 2);
            assert_eq!(vv_rows, 1);
        }
        other => panic!("expected EmptyJoin, got {:?}", other),
    }
}

#[test]
fn pipeline_is_deterministic_across_runs() {
    let vh_csv = b"date,mean\n2024-01-01,10\n2024-01-04,11\n2024-01-07,12\n";
    let vv_csv = b"date,mean\n2024-01-01,5\n2024-01-04,5.5\n2024-01-07,6\n";
    let ndvi_csv = b"date,mean,cloudCoveragePercent\n\
        2024-01-01,0.3,5\n2024-01-04,0.4,55\n2024-01-07,0.5,15\n";
    let model = LinearNdviModel::new("test", 0.02, 0.01, 0.03);

    let first = run(vh_csv, vv_csv, ndvi_csv, 20.0, &model).unwrap();
    let second = run(vh_csv, vv_csv, ndvi_csv, 20.0, &model).unwrap();
    assert_eq!(first, second);
}
