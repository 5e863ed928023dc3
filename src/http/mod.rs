//! HTTP server module for the NDVI backend.
//!
//! This module provides an axum-based HTTP server that exposes the fusion
//! pipeline as a REST API. It reuses the service layer and domain types from
//! the core library; handlers only parse uploads, invoke the pipeline, and
//! shape the response.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
