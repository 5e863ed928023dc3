//! Error types for the NDVI estimation pipeline.
//!
//! Every variant carries enough context (input name, column names, row
//! counts, threshold) for the caller to self-correct its upload; nothing is
//! swallowed or retried inside the pipeline. The HTTP layer maps these to
//! transport status codes.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required column is absent from an input table.
    #[error("missing columns in {input} file: [{}]", .missing.join(", "))]
    Schema {
        /// Which upload the columns were missing from ("vh", "vv", "ndvi").
        input: String,
        /// The exact missing column names.
        missing: Vec<String>,
    },

    /// The unique-dates-per-series invariant was violated.
    #[error("duplicate date {date} in {input} file")]
    DuplicateDate { input: String, date: NaiveDate },

    /// A data row could not be parsed (bad date or non-numeric value).
    #[error("invalid row {line} in {input} file: {message}")]
    Row {
        input: String,
        line: u64,
        message: String,
    },

    /// The cloud filter removed every optical sample.
    #[error(
        "no NDVI data remaining after applying cloud threshold of {threshold}% \
         ({total} samples read)"
    )]
    InsufficientData { threshold: f64, total: usize },

    /// The radar bands share no acquisition dates.
    #[error(
        "no common dates between radar bands after inner join \
         (vh: {vh_rows} rows, vv: {vv_rows} rows)"
    )]
    EmptyJoin { vh_rows: usize, vv_rows: usize },
}
