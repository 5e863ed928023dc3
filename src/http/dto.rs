//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Dates are rendered as ISO 8601 calendar strings for the client.

use serde::{Deserialize, Serialize};

use crate::models::{DailyPrediction, PredictionType};

/// Query parameters for the predict endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PredictQuery {
    /// Maximum allowable cloud coverage percentage (default: 20.0)
    #[serde(default)]
    pub cloud_threshold: Option<f64>,
}

/// One daily prediction record as exposed to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecordDto {
    /// ISO 8601 calendar date
    pub date: String,
    /// VH backscatter mean
    pub vh: f64,
    /// VV backscatter mean
    pub vv: f64,
    /// Resulting NDVI value (observed or estimated)
    pub ndvi: f64,
    /// Cloud coverage of the nearest optical observation
    #[serde(rename = "cloudCoveragePercent")]
    pub cloud_coverage_percent: f64,
    /// Provenance of the NDVI value
    pub prediction_type: PredictionType,
}

impl From<DailyPrediction> for PredictionRecordDto {
    fn from(p: DailyPrediction) -> Self {
        Self {
            date: p.date.format("%Y-%m-%d").to_string(),
            vh: p.vh,
            vv: p.vv,
            ndvi: p.ndvi,
            cloud_coverage_percent: p.cloud_coverage_percent,
            prediction_type: p.prediction_type,
        }
    }
}

/// Response for the predict endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Message about the operation
    pub message: String,
    /// Daily prediction records
    pub predictions: Vec<PredictionRecordDto>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Loaded model version
    pub model: String,
}

/// Welcome message for the index route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
}
