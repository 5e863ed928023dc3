//! CSV readers for the per-band time series uploads (the "band reader" stage).
//!
//! Each upload is a headered CSV. Radar bands require `{date, mean}`; the
//! optical NDVI series additionally requires `cloudCoveragePercent`. Column
//! validation reports the exact missing names and the offending source so the
//! client can correct its export. Extra columns are ignored.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use crate::models::{BandSample, OpticalSample};
use crate::services::error::{PipelineError, PipelineResult};

/// Column carrying the per-sample cloud coverage in the optical upload.
pub const CLOUD_COVERAGE_COLUMN: &str = "cloudCoveragePercent";

/// Read a radar band CSV (`{date, mean}`) into samples.
///
/// `source` names the upload ("vh" or "vv") for error reporting.
pub fn read_radar_csv(source: &str, data: &[u8]) -> PipelineResult<Vec<BandSample>> {
    let mut reader = csv::Reader::from_reader(data);
    let columns = ColumnMap::resolve(source, &mut reader, false)?;

    let mut samples = Vec::new();
    let mut seen = HashSet::new();
    for record in reader.records() {
        let record = map_csv_error(source, record)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let date = columns.date(source, &record, line)?;
        if !seen.insert(date) {
            return Err(PipelineError::DuplicateDate {
                input: source.to_string(),
                date,
            });
        }
        let mean = columns.mean(source, &record, line)?;
        samples.push(BandSample::new(date, mean));
    }

    log::debug!("read {} rows from {} upload", samples.len(), source);
    Ok(samples)
}

/// Read the optical NDVI CSV (`{date, mean, cloudCoveragePercent}`) into
/// samples.
pub fn read_optical_csv(source: &str, data: &[u8]) -> PipelineResult<Vec<OpticalSample>> {
    let mut reader = csv::Reader::from_reader(data);
    let columns = ColumnMap::resolve(source, &mut reader, true)?;

    let mut samples = Vec::new();
    let mut seen = HashSet::new();
    for record in reader.records() {
        let record = map_csv_error(source, record)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let date = columns.date(source, &record, line)?;
        if !seen.insert(date) {
            return Err(PipelineError::DuplicateDate {
                input: source.to_string(),
                date,
            });
        }
        let mean = columns.mean(source, &record, line)?;
        let cloud = columns.cloud(source, &record, line)?;
        samples.push(OpticalSample::new(date, mean, cloud));
    }

    log::debug!("read {} rows from {} upload", samples.len(), source);
    Ok(samples)
}

/// Resolved header indices for one upload.
struct ColumnMap {
    date: usize,
    mean: usize,
    cloud: Option<usize>,
}

impl ColumnMap {
    /// Locate the required columns in the header row, reporting every missing
    /// column at once.
    fn resolve<R: std::io::Read>(
        source: &str,
        reader: &mut csv::Reader<R>,
        with_cloud: bool,
    ) -> PipelineResult<Self> {
        let headers = map_csv_error(source, reader.headers().cloned())?;
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let date = find("date");
        let mean = find("mean");
        let cloud = find(CLOUD_COVERAGE_COLUMN);

        let mut missing = Vec::new();
        if date.is_none() {
            missing.push("date".to_string());
        }
        if mean.is_none() {
            missing.push("mean".to_string());
        }
        if with_cloud && cloud.is_none() {
            missing.push(CLOUD_COVERAGE_COLUMN.to_string());
        }
        if !missing.is_empty() {
            return Err(PipelineError::Schema {
                input: source.to_string(),
                missing,
            });
        }

        Ok(Self {
            date: date.unwrap(),
            mean: mean.unwrap(),
            cloud,
        })
    }

    fn date(
        &self,
        source: &str,
        record: &csv::StringRecord,
        line: u64,
    ) -> PipelineResult<NaiveDate> {
        let raw = self.field(source, record, self.date, line)?;
        parse_date(raw).ok_or_else(|| PipelineError::Row {
            input: source.to_string(),
            line,
            message: format!("unparseable date '{}'", raw),
        })
    }

    fn mean(&self, source: &str, record: &csv::StringRecord, line: u64) -> PipelineResult<f64> {
        self.float(source, record, self.mean, "mean", line)
    }

    fn cloud(&self, source: &str, record: &csv::StringRecord, line: u64) -> PipelineResult<f64> {
        // Presence was checked during resolution for optical uploads.
        let idx = self.cloud.expect("cloud column resolved for optical upload");
        self.float(source, record, idx, CLOUD_COVERAGE_COLUMN, line)
    }

    fn float(
        &self,
        source: &str,
        record: &csv::StringRecord,
        idx: usize,
        name: &str,
        line: u64,
    ) -> PipelineResult<f64> {
        let raw = self.field(source, record, idx, line)?;
        raw.trim().parse::<f64>().map_err(|_| PipelineError::Row {
            input: source.to_string(),
            line,
            message: format!("non-numeric {} '{}'", name, raw),
        })
    }

    fn field<'r>(
        &self,
        source: &str,
        record: &'r csv::StringRecord,
        idx: usize,
        line: u64,
    ) -> PipelineResult<&'r str> {
        record.get(idx).ok_or_else(|| PipelineError::Row {
            input: source.to_string(),
            line,
            message: format!("row has only {} fields", record.len()),
        })
    }
}

/// Parse an acquisition date. Plain ISO calendar dates are the norm; full
/// timestamps occasionally show up in exports and are truncated to the day.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn map_csv_error<T>(source: &str, result: Result<T, csv::Error>) -> PipelineResult<T> {
    result.map_err(|e| PipelineError::Row {
        input: source.to_string(),
        line: e.position().map(|p| p.line()).unwrap_or(0),
        message: e.to_string(),
    })
}
