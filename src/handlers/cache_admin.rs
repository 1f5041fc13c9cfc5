use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use tracing::info;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub cleared: String,
}

/// `POST /api/v1/cache/refresh` — drop every cached entry; the next reads
/// fetch fresh data.
pub async fn refresh_all(State(state): State<AppState>) -> Json<RefreshResponse> {
    state.cache.clear();
    info!("report cache cleared");
    Json(RefreshResponse {
        cleared: "all".to_string(),
    })
}

/// `POST /api/v1/projects/{name}/cache/refresh` — evict only the
/// project-scoped keys for one project.
pub async fn refresh_project(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<RefreshResponse> {
    state.cache.invalidate_project(&name);
    info!(project = %name, "project cache entries evicted");
    Json(RefreshResponse { cleared: name })
}
