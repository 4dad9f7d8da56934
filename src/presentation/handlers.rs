// HTTP request handlers
use crate::application::backend_repository::{CsvReportQuery, StationReportRequest, TrajectoryFilter};
use crate::application::report_service::ReportError;
use crate::domain::trajectory::{station_names, Trajectory};
use crate::infrastructure::http_response::{document_response, error_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct TrajectoryListResponse {
    data: Vec<Trajectory>,
    /// Distinct stations present in `data`, for the map legend and the
    /// report-selection controls.
    stations: Vec<String>,
}

#[derive(Serialize)]
struct StationListResponse {
    stations: Vec<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Normalized trajectories for the map view, optionally filtered by date,
/// station or device.
pub async fn list_trajectories(
    Query(filter): Query<TrajectoryFilter>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.trajectory_service.list_trajectories(&filter).await {
        Ok(data) => {
            let stations = station_names(&data);
            Json(TrajectoryListResponse { data, stations }).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to fetch trajectories: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch trajectories",
                &e.to_string(),
            )
        }
    }
}

/// Station identifiers for the report-selection controls.
pub async fn list_stations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.trajectory_service.list_stations().await {
        Ok(stations) => Json(StationListResponse { stations }).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch stations: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch stations",
                &e.to_string(),
            )
        }
    }
}

/// CSV report relayed from the backend as JSON.
pub async fn csv_report(
    Query(query): Query<CsvReportQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    match state.report_service.csv_report(&query).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::error!("Failed to generate CSV report: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate CSV report",
                &e.to_string(),
            )
        }
    }
}

/// Two-station comparison document, relayed with download headers.
pub async fn download_station_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StationReportRequest>,
) -> impl IntoResponse {
    match state.report_service.station_report(&request).await {
        Ok(document) => match document_response(document) {
            Ok(response) => response.into_response(),
            Err(status) => status.into_response(),
        },
        Err(ReportError::Invalid(details)) => error_response(
            StatusCode::BAD_REQUEST,
            "Invalid station report request",
            &details,
        ),
        Err(ReportError::Backend(e)) => {
            tracing::error!("Failed to generate station report: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate station report",
                &e.to_string(),
            )
        }
    }
}
