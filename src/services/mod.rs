//! Pipeline stages and orchestration for cloud-aware NDVI estimation.
//!
//! Each stage is a pure function over owned/borrowed series data; the
//! orchestrator in [`pipeline`] wires them together in dependency order:
//! align the radar bands, gap-fill the optical series, merge by nearest date,
//! then route each record to its observed or estimated value.

pub mod align;

pub mod error;

pub mod interpolate;

pub mod merge;

pub mod pipeline;

pub mod predict;

pub use align::align_radar_bands;
pub use error::{PipelineError, PipelineResult};
pub use interpolate::daily_optical_series;
pub use merge::merge_nearest;
pub use pipeline::{run_pipeline, DEFAULT_CLOUD_THRESHOLD};
pub use predict::route_estimates;
