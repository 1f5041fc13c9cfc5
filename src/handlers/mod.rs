//! HTTP surface: one route per dashboard section plus cache administration
//! and health probes.

pub mod cache_admin;
pub mod health;
pub mod projects;
pub mod reports;

use axum::{
    routing::{get, post},
    Router,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/projects", get(projects::list_projects))
        .route("/projects/:name", get(projects::get_project))
        .route("/projects/:name/dashboard", get(projects::get_dashboard))
        .route(
            "/projects/:name/materials/summary",
            get(reports::materials_summary),
        )
        .route(
            "/projects/:name/materials/detail",
            get(reports::materials_detail),
        )
        .route("/projects/:name/sheets", get(reports::sheet_totals))
        .route("/projects/:name/trips", get(reports::trips))
        .route("/projects/:name/allowances", get(reports::allowances))
        .route("/cache/refresh", post(cache_admin::refresh_all))
        .route(
            "/projects/:name/cache/refresh",
            post(cache_admin::refresh_project),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .nest("/api/v1", api)
        .with_state(state)
}
