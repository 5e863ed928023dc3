//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the pipeline
//! service layer for the actual work.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};

use super::dto::{
    HealthResponse, IndexResponse, PredictQuery, PredictResponse, PredictionRecordDto,
};
use super::error::AppError;
use super::state::AppState;
use crate::parsing::{read_optical_csv, read_radar_csv};
use crate::services::{run_pipeline, DEFAULT_CLOUD_THRESHOLD};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /
///
/// Welcome message, mirroring the index route the frontend probes.
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "Welcome to the NDVI Prediction API".to_string(),
    })
}

/// GET /health
///
/// Health check endpoint to verify the service is running and the model
/// artifact was loaded.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        model: state.estimator.version().to_string(),
    }))
}

/// Uploaded CSV payloads, one per band.
struct Uploads {
    vh: Vec<u8>,
    vv: Vec<u8>,
    ndvi: Vec<u8>,
}

/// POST /v1/predict
///
/// Accepts a multipart form with `vh_file`, `vv_file` and `ndvi_file` CSV
/// uploads plus an optional `cloud_threshold` query parameter, runs the
/// fusion pipeline, and returns the daily prediction records.
pub async fn predict(
    State(state): State<AppState>,
    Query(query): Query<PredictQuery>,
    multipart: Multipart,
) -> HandlerResult<PredictResponse> {
    let cloud_threshold = query.cloud_threshold.unwrap_or(DEFAULT_CLOUD_THRESHOLD);
    if !(0.0..=100.0).contains(&cloud_threshold) {
        return Err(AppError::BadRequest(format!(
            "cloud_threshold must be within [0, 100], got {}",
            cloud_threshold
        )));
    }

    let uploads = collect_uploads(multipart).await?;
    let estimator = state.estimator.clone();

    // The pipeline is CPU-bound; keep it off the async executor.
    let predictions = tokio::task::spawn_blocking(move || {
        let vh = read_radar_csv("vh", &uploads.vh)?;
        let vv = read_radar_csv("vv", &uploads.vv)?;
        let ndvi = read_optical_csv("ndvi", &uploads.ndvi)?;
        run_pipeline(&vh, &vv, &ndvi, cloud_threshold, estimator.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(PredictResponse {
        message: "Prediction successful".to_string(),
        predictions: predictions
            .into_iter()
            .map(PredictionRecordDto::from)
            .collect(),
    }))
}

/// Drain the multipart form into the three expected uploads, reporting every
/// missing field at once.
async fn collect_uploads(mut multipart: Multipart) -> Result<Uploads, AppError> {
    let mut vh = None;
    let mut vv = None;
    let mut ndvi = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart form: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload '{}': {}", name, e)))?;
        match name.as_str() {
            "vh_file" => vh = Some(data.to_vec()),
            "vv_file" => vv = Some(data.to_vec()),
            "ndvi_file" => ndvi = Some(data.to_vec()),
            // Unknown fields are ignored rather than rejected.
            _ => {}
        }
    }

    let mut missing = Vec::new();
    if vh.is_none() {
        missing.push("vh_file");
    }
    if vv.is_none() {
        missing.push("vv_file");
    }
    if ndvi.is_none() {
        missing.push("ndvi_file");
    }
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Missing multipart fields: {}",
            missing.join(", ")
        )));
    }

    Ok(Uploads {
        vh: vh.unwrap(),
        vv: vv.unwrap(),
        ndvi: ndvi.unwrap(),
    })
}
