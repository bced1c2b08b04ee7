// SPDX-License-Identifier: MIT

//! Carbonlog API Server
//!
//! Tracks personal carbon footprints: free-text activity logging with
//! keyword-based emission classification, daily/weekly dashboards and a
//! scheduled rollup of each day's activity into archived history.

use carbonlog::{
    config::Config,
    db::FirestoreDb,
    services::{Classifier, EmissionFactors},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Carbonlog API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Load the emission factor table once; the classifier is stateless
    // and shared across all requests.
    let classifier = Classifier::new(EmissionFactors::default());
    tracing::info!("Emission classifier initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        classifier,
    });

    // Build router
    let app = carbonlog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carbonlog=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
