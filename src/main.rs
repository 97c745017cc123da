// SPDX-License-Identifier: MIT

//! LearnLoop API Server
//!
//! Serves the gamification core of the mobile learning app: stats accrual,
//! streak tracking, lesson progress, and peer chat pairing.

use learnloop::{
    config::Config,
    db::FirestoreDb,
    services::{PairingService, ProgressService, StatsService},
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
    tracing::info!(port = config.port, "Starting LearnLoop API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Build services
    let stats_service = StatsService::new(db.clone());
    let pairing_service = PairingService::new(db.clone());
    let progress_service = ProgressService::new(db.clone(), stats_service.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        stats_service,
        pairing_service,
        progress_service,
    });

    // Build router
    let app = learnloop::routes::create_router(state);

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
                .add_directive("learnloop=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
