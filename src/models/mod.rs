//! Core domain types for the NDVI estimation pipeline.

pub mod series;

pub use series::{
    BandSample, DailyPrediction, MergedRecord, OpticalSample, PredictionType, RadarRecord,
};
