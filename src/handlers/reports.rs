use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::errors::ServiceError;
use crate::reports::materials::{CategoryGroup, DetailEntry, SummaryEntry};
use crate::reports::sheets::SheetTotals;
use crate::reports::trips::TripDay;
use crate::services::AllowanceStatus;
use crate::AppState;

/// `GET /api/v1/projects/{name}/materials/summary`
pub async fn materials_summary(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<CategoryGroup<SummaryEntry>>>, ServiceError> {
    Ok(Json(state.services.materials.summary(&name).await?))
}

/// `GET /api/v1/projects/{name}/materials/detail`
pub async fn materials_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<CategoryGroup<DetailEntry>>>, ServiceError> {
    Ok(Json(state.services.materials.detail(&name).await?))
}

/// `GET /api/v1/projects/{name}/sheets`
pub async fn sheet_totals(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<SheetTotals>>, ServiceError> {
    Ok(Json(state.services.sheets.totals(&name).await?))
}

/// `GET /api/v1/projects/{name}/trips`
pub async fn trips(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<TripDay>>, ServiceError> {
    Ok(Json(state.services.deliveries.trips(&name).await?))
}

/// `GET /api/v1/projects/{name}/allowances`
pub async fn allowances(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<AllowanceStatus>>, ServiceError> {
    Ok(Json(state.services.allowances.statuses(&name).await?))
}
