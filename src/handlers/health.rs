use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "im ready",
            "UTC_time": chrono::Utc::now().to_rfc2822(),
            "targets": state.config.targets.len(),
            "catalogs_ready": state.catalogs.len(),
        })),
    )
}
