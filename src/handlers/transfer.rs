// src/handlers/transfer.rs
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::dtos::document::SetStatusRequest;
use crate::dtos::transfer::{CreateTransferRequest, TransferResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// GET /transfers
#[instrument(skip(state))]
pub async fn list_transfers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransferResponse>>, AppError> {
    let transfers = state.inventory.transfers().await;
    Ok(Json(
        transfers.into_iter().map(TransferResponse::from).collect(),
    ))
}

// GET /transfers/:id
#[instrument(skip(state), fields(id = %id))]
pub async fn get_transfer(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<TransferResponse>, AppError> {
    let transfer = state.inventory.transfer(id).await?;
    Ok(Json(TransferResponse::from(transfer)))
}

// POST /transfers - Create in Draft; source and destination must differ
#[instrument(skip(state, payload))]
pub async fn create_transfer(
    State(state): State<AppState>,
    Json(payload): Json<CreateTransferRequest>,
) -> Result<(StatusCode, Json<TransferResponse>), AppError> {
    let transfer = state.inventory.create_transfer(payload).await?;
    Ok((StatusCode::CREATED, Json(TransferResponse::from(transfer))))
}

// POST /transfers/:id/validate - Draft/Waiting -> Done, two movements per line
#[instrument(skip(state), fields(id = %id))]
pub async fn validate_transfer(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<TransferResponse>, AppError> {
    let transfer = state.inventory.validate_transfer(id, auth.user_id).await?;
    Ok(Json(TransferResponse::from(transfer)))
}

// PATCH /transfers/:id/status
#[instrument(skip(state), fields(id = %id))]
pub async fn set_transfer_status(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let transfer = state
        .inventory
        .set_transfer_status(id, payload.status)
        .await?;
    Ok(Json(TransferResponse::from(transfer)))
}
