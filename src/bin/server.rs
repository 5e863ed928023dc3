//! NDVI HTTP Server Binary
//!
//! This is the main entry point for the NDVI REST API server. It loads the
//! regression model artifact, sets up the HTTP router, and starts serving
//! requests.
//!
//! # Usage
//!
//! ```bash
//! NDVI_MODEL_PATH=models/ndvi_linear.json cargo run --bin ndvi-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `NDVI_MODEL_PATH`: Path to the model artifact (default: models/ndvi_linear.json)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ndvi_rust::estimator;
use ndvi_rust::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting NDVI HTTP Server");

    // Load the regression artifact once; a failure here is fatal by design.
    let model_path = env::var("NDVI_MODEL_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("models/ndvi_linear.json"));
    estimator::init_estimator(&model_path)
        .map_err(|e| anyhow::anyhow!("estimator unavailable: {}", e))?;
    let model = std::sync::Arc::clone(estimator::get_estimator()?);
    info!("NDVI model '{}' loaded", model.version());

    // Create application state
    let state = AppState::new(model);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
