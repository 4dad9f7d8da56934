// Remote backend client implementation
use crate::application::backend_repository::{
    BackendError, BackendRepository, CsvReportQuery, ReportDocument, StationReportRequest,
    TrajectoryFilter,
};
use crate::domain::trajectory::RawTrajectory;
use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;
use std::time::Duration;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const DEFAULT_DISPOSITION: &str = "attachment; filename=\"station_report.xlsx\"";

#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Envelope the backend wraps trajectory lists in. A missing `data` field
/// is treated as an empty list.
#[derive(Debug, Deserialize)]
struct TrajectoriesEnvelope {
    #[serde(default)]
    data: Vec<RawTrajectory>,
}

#[derive(Debug, Deserialize)]
struct StationsEnvelope {
    #[serde(default)]
    stations: Vec<String>,
}

impl RemoteBackend {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str, params: &[(&str, Option<&str>)]) -> String {
        format!("{}{}{}", self.base_url, path, query_string(params))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status { status, body })
    }
}

/// Builds a `?k=v&...` query string from the parameters that are present,
/// percent-encoding the values. Empty when no parameter is set.
fn query_string(params: &[(&str, Option<&str>)]) -> String {
    let parts: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| value.map(|v| format!("{}={}", key, urlencoding::encode(v))))
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

#[async_trait]
impl BackendRepository for RemoteBackend {
    async fn fetch_trajectories(
        &self,
        filter: &TrajectoryFilter,
    ) -> Result<Vec<RawTrajectory>, BackendError> {
        let url = self.url(
            "/api/trajectories",
            &[
                ("date_filter", filter.date_filter.as_deref()),
                ("station_filter", filter.station_filter.as_deref()),
                ("device_filter", filter.device_filter.as_deref()),
            ],
        );
        tracing::debug!(%url, "Requesting trajectories from backend");

        let response = Self::check_status(self.client.get(&url).send().await?).await?;
        let envelope = response.json::<TrajectoriesEnvelope>().await?;
        Ok(envelope.data)
    }

    async fn fetch_stations(&self) -> Result<Vec<String>, BackendError> {
        let url = self.url("/api/stations", &[]);

        let response = Self::check_status(self.client.get(&url).send().await?).await?;
        let envelope = response.json::<StationsEnvelope>().await?;
        Ok(envelope.stations)
    }

    async fn fetch_csv_report(
        &self,
        query: &CsvReportQuery,
    ) -> Result<serde_json::Value, BackendError> {
        let url = self.url(
            "/report/csv",
            &[
                ("device_id", query.device_id.as_deref()),
                ("start_date", query.start_date.as_deref()),
                ("end_date", query.end_date.as_deref()),
            ],
        );
        tracing::debug!(%url, "Requesting CSV report from backend");

        let response = Self::check_status(self.client.get(&url).send().await?).await?;
        Ok(response.json::<serde_json::Value>().await?)
    }

    async fn fetch_station_report(
        &self,
        request: &StationReportRequest,
    ) -> Result<ReportDocument, BackendError> {
        let url = self.url("/api/download-station-report", &[]);
        tracing::debug!(%url, "Requesting station report from backend");

        let response =
            Self::check_status(self.client.post(&url).json(request).send().await?).await?;

        let header_value = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        let content_type =
            header_value(header::CONTENT_TYPE).unwrap_or_else(|| XLSX_CONTENT_TYPE.to_string());
        let content_disposition = header_value(header::CONTENT_DISPOSITION)
            .unwrap_or_else(|| DEFAULT_DISPOSITION.to_string());

        let bytes = response.bytes().await?;

        Ok(ReportDocument {
            content_type,
            content_disposition,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_skips_absent_params() {
        let qs = query_string(&[
            ("date_filter", Some("2024-06-01")),
            ("station_filter", None),
            ("device_filter", Some("radio 7")),
        ]);

        assert_eq!(qs, "?date_filter=2024-06-01&device_filter=radio%207");
    }

    #[test]
    fn test_query_string_empty_when_no_params_set() {
        assert_eq!(query_string(&[("date_filter", None)]), "");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = RemoteBackend::new("https://backend.example.com/".to_string(), 30).unwrap();
        assert_eq!(
            backend.url("/api/stations", &[]),
            "https://backend.example.com/api/stations"
        );
    }
}
