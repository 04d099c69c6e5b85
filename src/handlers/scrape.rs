use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tracing::debug;

use crate::collector;
use crate::state::AppState;

/// `GET /?target=<адрес или алиас>`
pub async fn scrape(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut targets = params.iter().filter(|(key, _)| key == "target");
    let name = match (targets.next(), targets.next()) {
        (Some((_, name)), None) if !name.is_empty() => name,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "'target' parameter must be specified once".to_string(),
            ));
        }
    };

    let target = state
        .config
        .find_target(name)
        .ok_or((StatusCode::NOT_FOUND, "Not found".to_string()))?;

    let samples = match state.catalogs.get(&target.host) {
        Some(catalog) => {
            collector::collect(
                target,
                catalog,
                &state.config.community,
                &state.config.snmp.session_options(),
                &state.classifier,
            )
            .await
        }
        None => {
            debug!(device = %target.host, "Каталога нет, отдаём пустой ответ");
            Vec::new()
        }
    };

    let body = collector::render(samples)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
