// src/handlers/adjustment.rs
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::dtos::adjustment::{AdjustmentResponse, CreateAdjustmentRequest};
use crate::dtos::document::SetStatusRequest;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// GET /adjustments
#[instrument(skip(state))]
pub async fn list_adjustments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdjustmentResponse>>, AppError> {
    let adjustments = state.inventory.adjustments().await;
    Ok(Json(
        adjustments
            .into_iter()
            .map(AdjustmentResponse::from)
            .collect(),
    ))
}

// GET /adjustments/:id
#[instrument(skip(state), fields(id = %id))]
pub async fn get_adjustment(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    let adjustment = state.inventory.adjustment(id).await?;
    Ok(Json(AdjustmentResponse::from(adjustment)))
}

// POST /adjustments - Create in Draft; difference computed per line
#[instrument(skip(state, payload))]
pub async fn create_adjustment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdjustmentRequest>,
) -> Result<(StatusCode, Json<AdjustmentResponse>), AppError> {
    let adjustment = state.inventory.create_adjustment(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AdjustmentResponse::from(adjustment)),
    ))
}

// POST /adjustments/:id/validate - Draft/Waiting -> Done, signed deltas
#[instrument(skip(state), fields(id = %id))]
pub async fn validate_adjustment(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    let adjustment = state
        .inventory
        .validate_adjustment(id, auth.user_id)
        .await?;
    Ok(Json(AdjustmentResponse::from(adjustment)))
}

// PATCH /adjustments/:id/status
#[instrument(skip(state), fields(id = %id))]
pub async fn set_adjustment_status(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<AdjustmentResponse>, AppError> {
    let adjustment = state
        .inventory
        .set_adjustment_status(id, payload.status)
        .await?;
    Ok(Json(AdjustmentResponse::from(adjustment)))
}
