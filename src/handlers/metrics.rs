use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::telemetry;

/// Счётчики самого экспортера
pub async fn self_metrics() -> Result<impl IntoResponse, (StatusCode, String)> {
    let body = telemetry::render().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
