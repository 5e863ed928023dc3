//! Application state for the HTTP server.

use crate::estimator::NdviEstimator;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pre-loaded regression model, read-only after startup.
    pub estimator: Arc<dyn NdviEstimator>,
}

impl AppState {
    /// Create a new application state with the given estimator.
    pub fn new(estimator: Arc<dyn NdviEstimator>) -> Self {
        Self { estimator }
    }
}
