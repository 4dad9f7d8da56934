// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::report_service::ReportService;
use crate::application::trajectory_service::TrajectoryService;
use crate::infrastructure::config::load_backend_config;
use crate::infrastructure::remote_backend::RemoteBackend;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    csv_report, download_station_report, health_check, list_stations, list_trajectories,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    let backend_config = load_backend_config()?;
    tracing::info!(base_url = %backend_config.backend.base_url, "Loaded backend configuration");

    // Create repository (infrastructure layer)
    let backend = Arc::new(RemoteBackend::new(
        backend_config.backend.base_url,
        backend_config.backend.timeout_secs,
    )?);

    // Create services (application layer)
    let trajectory_service = TrajectoryService::new(backend.clone());
    let report_service = ReportService::new(backend);

    // Create application state
    let state = Arc::new(AppState {
        trajectory_service,
        report_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/api/trajectories", get(list_trajectories))
        .route("/api/stations", get(list_stations))
        .route("/api/report/csv", get(csv_report))
        .route("/api/download-station-report", post(download_station_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
    tracing::info!("Starting radio-trajectory-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
