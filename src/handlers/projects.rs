use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::models::Project;
use crate::reports::materials::{CategoryGroup, SummaryEntry};
use crate::reports::sheets::SheetTotals;
use crate::reports::trips::TripDay;
use crate::services::AllowanceStatus;
use crate::AppState;

/// `GET /api/v1/projects` — every project, cached for 15 minutes.
pub async fn list_projects(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.services.projects.list_projects().await)
}

/// `GET /api/v1/projects/{name}` — a single project or 404.
pub async fn get_project(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Project>, ServiceError> {
    match state.services.projects.project_by_name(&name).await? {
        Some(project) => Ok(Json(project)),
        None => Err(ServiceError::NotFound(format!("project {name}"))),
    }
}

/// All dashboard sections for one project. Each section degrades
/// independently; only a missing project fails the whole response.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub project: Project,
    pub materials: Vec<CategoryGroup<SummaryEntry>>,
    pub sheets: Vec<SheetTotals>,
    pub trips: Vec<TripDay>,
    pub allowances: Vec<AllowanceStatus>,
}

/// `GET /api/v1/projects/{name}/dashboard` — the four report sections fetched
/// concurrently.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DashboardResponse>, ServiceError> {
    let project = state
        .services
        .projects
        .project_by_name(&name)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("project {name}")))?;

    let (materials, sheets, trips, allowances) = tokio::join!(
        state.services.materials.summary(&name),
        state.services.sheets.totals(&name),
        state.services.deliveries.trips(&name),
        state.services.allowances.statuses(&name),
    );

    Ok(Json(DashboardResponse {
        project,
        materials: materials?,
        sheets: sheets?,
        trips: trips?,
        allowances: allowances?,
    }))
}
