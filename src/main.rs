// SPDX-License-Identifier: MIT

//! OnRoute API Server
//!
//! Plans road trips between two places and recommends restaurant and gas
//! stops along the way, personalized to the signed-in user.

use onroute::{
    config::Config,
    db::{FirestoreDb, Store},
    services::Recommender,
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
    tracing::info!(port = config.port, "Starting OnRoute API");

    // Connect to Firestore. The store keeps an in-memory fallback, so a
    // database outage at boot degrades persistence instead of killing the
    // server.
    let primary = match FirestoreDb::new(&config.gcp_project_id).await {
        Ok(db) => db,
        Err(e) => {
            tracing::warn!(error = %e, "Firestore unavailable, starting with in-memory storage only");
            FirestoreDb::new_mock()
        }
    };
    let store = Store::new(primary);

    let recommender = Recommender::new(&config);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        recommender,
    });

    // Build router
    let app = onroute::routes::create_router(state);

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
                .add_directive("onroute=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
