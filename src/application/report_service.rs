// Report service - Use cases for generated reports
use crate::application::backend_repository::{
    BackendError, BackendRepository, CsvReportQuery, ReportDocument, StationReportRequest,
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid report request: {0}")]
    Invalid(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

#[derive(Clone)]
pub struct ReportService {
    repository: Arc<dyn BackendRepository>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn BackendRepository>) -> Self {
        Self { repository }
    }

    pub async fn csv_report(
        &self,
        query: &CsvReportQuery,
    ) -> Result<serde_json::Value, BackendError> {
        self.repository.fetch_csv_report(query).await
    }

    /// Requests a two-station comparison document. The two stations must be
    /// distinct and all fields non-empty.
    pub async fn station_report(
        &self,
        request: &StationReportRequest,
    ) -> Result<ReportDocument, ReportError> {
        Self::validate(request)?;
        Ok(self.repository.fetch_station_report(request).await?)
    }

    fn validate(request: &StationReportRequest) -> Result<(), ReportError> {
        let required = [
            ("start_date", &request.start_date),
            ("end_date", &request.end_date),
            ("station1", &request.station1),
            ("station2", &request.station2),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ReportError::Invalid(format!("{field} must not be empty")));
            }
        }
        if request.station1 == request.station2 {
            return Err(ReportError::Invalid(
                "station1 and station2 must be different".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(station1: &str, station2: &str) -> StationReportRequest {
        StationReportRequest {
            start_date: "2024-06-01".to_string(),
            end_date: "2024-06-02".to_string(),
            station1: station1.to_string(),
            station2: station2.to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_distinct_stations() {
        assert!(ReportService::validate(&request("Alpha", "Bravo")).is_ok());
    }

    #[test]
    fn test_validate_rejects_same_station() {
        let err = ReportService::validate(&request("Alpha", "Alpha")).unwrap_err();
        assert!(matches!(err, ReportError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let err = ReportService::validate(&request("  ", "Bravo")).unwrap_err();
        assert!(matches!(err, ReportError::Invalid(_)));
    }
}
