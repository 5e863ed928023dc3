//! Regression model abstraction for radar-based NDVI estimation.
//!
//! The trained model is an opaque, versioned artifact fitted offline; this
//! module only loads it and evaluates it. The artifact is read once at process
//! start and shared read-only across requests, so no locking is needed.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Result type for estimator operations.
pub type EstimatorResult<T> = Result<T, EstimatorError>;

#[derive(Debug, Error)]
pub enum EstimatorError {
    /// The artifact file could not be read.
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The artifact file is not a valid model description.
    #[error("malformed model artifact {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The global estimator was requested before initialization.
    #[error("estimator not initialized. Call init_estimator() first.")]
    NotInitialized,
}

/// A pre-fitted regression model mapping radar backscatter to an NDVI
/// estimate.
///
/// Implementations must be pure: the same `(vh, vv)` input always yields the
/// same output, so reordering pipeline records cannot change any result.
pub trait NdviEstimator: Send + Sync {
    /// Estimate NDVI from the VH and VV backscatter means.
    fn estimate(&self, vh: f64, vv: f64) -> f64;

    /// Artifact version string, for diagnostics.
    fn version(&self) -> &str;
}

/// On-disk representation of a fitted linear model.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearArtifact {
    version: String,
    intercept: f64,
    coefficients: Coefficients,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Coefficients {
    vh: f64,
    vv: f64,
}

/// Linear regression over the two radar bands, the Rust counterpart of the
/// original pickled scikit-learn model.
#[derive(Debug, Clone)]
pub struct LinearNdviModel {
    version: String,
    intercept: f64,
    vh_coef: f64,
    vv_coef: f64,
}

impl LinearNdviModel {
    /// Construct directly from fitted parameters. Mostly useful in tests.
    pub fn new(version: impl Into<String>, intercept: f64, vh_coef: f64, vv_coef: f64) -> Self {
        Self {
            version: version.into(),
            intercept,
            vh_coef,
            vv_coef,
        }
    }

    /// Load a fitted model from a JSON artifact.
    pub fn load(path: &Path) -> EstimatorResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| EstimatorError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let artifact: LinearArtifact =
            serde_json::from_str(&raw).map_err(|e| EstimatorError::Malformed {
                path: path.display().to_string(),
                source: e,
            })?;

        log::info!(
            "loaded NDVI model '{}' from {}",
            artifact.version,
            path.display()
        );
        Ok(Self {
            version: artifact.version,
            intercept: artifact.intercept,
            vh_coef: artifact.coefficients.vh,
            vv_coef: artifact.coefficients.vv,
        })
    }
}

impl NdviEstimator for LinearNdviModel {
    fn estimate(&self, vh: f64, vv: f64) -> f64 {
        self.intercept + self.vh_coef * vh + self.vv_coef * vv
    }

    fn version(&self) -> &str {
        &self.version
    }
}

/// Global estimator instance initialized once per process.
static ESTIMATOR: OnceLock<Arc<dyn NdviEstimator>> = OnceLock::new();

/// Initialize the global estimator singleton from an artifact on disk.
///
/// Idempotent: repeated calls after a successful load are no-ops. A load
/// failure here is fatal to the service, not per-request recoverable.
pub fn init_estimator(path: &Path) -> EstimatorResult<()> {
    if ESTIMATOR.get().is_some() {
        return Ok(());
    }

    let model = LinearNdviModel::load(path)?;
    let _ = ESTIMATOR.set(Arc::new(model));
    Ok(())
}

/// Get a reference to the global estimator instance.
pub fn get_estimator() -> EstimatorResult<&'static Arc<dyn NdviEstimator>> {
    ESTIMATOR.get().ok_or(EstimatorError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_linear_model_evaluation() {
        let model = LinearNdviModel::new("test", 0.1, 0.02, -0.01);
        let estimate = model.estimate(10.0, 5.0);
        assert!((estimate - (0.1 + 0.2 - 0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_load_artifact() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version":"2024.1","intercept":0.05,"coefficients":{{"vh":0.03,"vv":-0.02}}}}"#
        )
        .unwrap();

        let model = LinearNdviModel::load(file.path()).unwrap();
        assert_eq!(model.version(), "2024.1");
        assert!((model.estimate(1.0, 1.0) - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_load_missing_artifact_is_io_error() {
        let err = LinearNdviModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, EstimatorError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_artifact() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = LinearNdviModel::load(file.path()).unwrap_err();
        assert!(matches!(err, EstimatorError::Malformed { .. }));
    }
}
