//! # NDVI Rust Backend
//!
//! Cloud-aware NDVI estimation engine.
//!
//! This crate provides a Rust backend for estimating a daily NDVI series from
//! satellite observations. Two radar backscatter bands (VH, VV) are fused with
//! an optical vegetation index whose samples may be obscured by clouds: usable
//! optical samples are interpolated onto a daily grid, and for days where the
//! nearest optical observation is too cloudy a pre-fitted regression model
//! estimates NDVI from the radar bands instead. The backend exposes a REST API
//! via Axum for the React frontend.
//!
//! ## Features
//!
//! - **Band Reading**: Parse per-band time series from uploaded CSV data
//! - **Series Alignment**: Inner-join the VH and VV bands by acquisition date
//! - **Gap Filling**: Piecewise-linear interpolation of cloud-free optical samples
//! - **Temporal Merging**: Nearest-date joins between radar and optical series
//! - **Estimator Routing**: Per-record actual-vs-predicted NDVI decision
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Core domain types (band samples, merged records, predictions)
//! - [`parsing`]: CSV readers with column-schema validation
//! - [`estimator`]: Regression model abstraction and artifact loading
//! - [`services`]: Pipeline stages and orchestration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod estimator;
pub mod models;
pub mod parsing;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
