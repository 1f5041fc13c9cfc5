use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

/// Liveness probe: the process is up.
pub async fn liveness() -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Health summary. There is no local persistence to probe; the AppSheet
/// backend is only reached lazily, so this reports process state plus cache
/// occupancy.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "up",
        "version": env!("CARGO_PKG_VERSION"),
        "cache_entries": state.cache.len(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
