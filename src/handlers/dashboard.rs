// src/handlers/dashboard.rs
use axum::{extract::State, Json};
use tracing::instrument;

use crate::dtos::dashboard::DashboardResponse;
use crate::error::AppError;
use crate::state::AppState;

// GET /dashboard - KPI counters
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    Ok(Json(state.inventory.dashboard().await))
}
