//! Input parsing for uploaded band time series.

pub mod csv_reader;


pub use csv_reader::{read_optical_csv, read_radar_csv};
