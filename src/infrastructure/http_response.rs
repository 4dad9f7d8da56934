// HTTP response utilities for the proxy handlers
use crate::application::backend_repository::ReportDocument;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

/// JSON error body in the shape the dashboard client expects:
/// `{ "error": ..., "details": ... }`.
pub fn error_response(status: StatusCode, error: &str, details: &str) -> axum::response::Response {
    (status, Json(json!({ "error": error, "details": details }))).into_response()
}

/// Relays a generated report document with the headers the browser needs
/// to trigger a file download.
pub fn document_response(document: ReportDocument) -> Result<Response<Body>, StatusCode> {
    let content_type = HeaderValue::from_str(&document.content_type)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let content_disposition = HeaderValue::from_str(&document.content_disposition)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition)
        .header(header::CONTENT_LENGTH, document.bytes.len())
        .body(Body::from(document.bytes))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
