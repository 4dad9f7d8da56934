// Repository trait for the remote trajectory backend
use crate::domain::trajectory::RawTrajectory;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Optional filters forwarded to the backend's trajectory endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrajectoryFilter {
    pub date_filter: Option<String>,
    pub station_filter: Option<String>,
    pub device_filter: Option<String>,
}

/// Parameters for the CSV report endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvReportQuery {
    pub device_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Request body for a two-station comparison report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationReportRequest {
    pub start_date: String,
    pub end_date: String,
    pub station1: String,
    pub station2: String,
}

/// Generated report document relayed from the backend, with the headers
/// the client needs to trigger a download.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub content_type: String,
    pub content_disposition: String,
    pub bytes: Bytes,
}

#[async_trait]
pub trait BackendRepository: Send + Sync {
    /// Fetch raw trajectory records, optionally filtered by date, station
    /// or device.
    async fn fetch_trajectories(
        &self,
        filter: &TrajectoryFilter,
    ) -> Result<Vec<RawTrajectory>, BackendError>;

    /// List station identifiers known to the backend.
    async fn fetch_stations(&self) -> Result<Vec<String>, BackendError>;

    /// Request a CSV-shaped report; the backend answers with JSON.
    async fn fetch_csv_report(&self, query: &CsvReportQuery)
        -> Result<serde_json::Value, BackendError>;

    /// Request a generated station comparison document (spreadsheet binary).
    async fn fetch_station_report(
        &self,
        request: &StationReportRequest,
    ) -> Result<ReportDocument, BackendError>;
}
