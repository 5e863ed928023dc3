//! Time-series record types shared across the pipeline stages.
//!
//! All types here are request-scoped: they are constructed from an uploaded
//! batch of series, transformed through the pipeline, and dropped once the
//! response has been serialized. Nothing persists across requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One sample of a single-band time series: acquisition date and mean value
/// over the area of interest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSample {
    pub date: NaiveDate,
    pub mean: f64,
}

impl BandSample {
    pub fn new(date: NaiveDate, mean: f64) -> Self {
        Self { date, mean }
    }
}

/// One sample of the optical NDVI series, annotated with the fraction of the
/// scene obscured by clouds (percentage in [0, 100]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalSample {
    pub date: NaiveDate,
    pub mean: f64,
    pub cloud_coverage_percent: f64,
}

impl OpticalSample {
    pub fn new(date: NaiveDate, mean: f64, cloud_coverage_percent: f64) -> Self {
        Self {
            date,
            mean,
            cloud_coverage_percent,
        }
    }
}

/// One row of the aligned radar table: both polarization bands observed on
/// the same date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarRecord {
    pub date: NaiveDate,
    pub vh: f64,
    pub vv: f64,
}

/// Output of the temporal merge: a radar record with the best-effort optical
/// value and the cloud coverage of the nearest actual optical observation
/// attached. Consumed read-only by the estimator router.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub date: NaiveDate,
    pub vh: f64,
    pub vv: f64,
    pub ndvi: f64,
    pub cloud_coverage_percent: f64,
}

/// Provenance of a final NDVI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionType {
    /// The observed (interpolated) optical value was trusted.
    Actual,
    /// The value was estimated from the radar bands.
    Predicted,
}

/// Final per-day pipeline output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub vh: f64,
    pub vv: f64,
    pub ndvi: f64,
    pub cloud_coverage_percent: f64,
    pub prediction_type: PredictionType,
}
