use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, scrape, self_metrics};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(scrape))
        .route("/health", get(health))
        .route("/metrics", get(self_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
