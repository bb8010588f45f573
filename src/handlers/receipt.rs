// src/handlers/receipt.rs
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::dtos::document::SetStatusRequest;
use crate::dtos::receipt::{CreateReceiptRequest, ReceiptResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// GET /receipts
#[instrument(skip(state))]
pub async fn list_receipts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReceiptResponse>>, AppError> {
    let receipts = state.inventory.receipts().await;
    Ok(Json(receipts.into_iter().map(ReceiptResponse::from).collect()))
}

// GET /receipts/:id
#[instrument(skip(state), fields(id = %id))]
pub async fn get_receipt(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ReceiptResponse>, AppError> {
    let receipt = state.inventory.receipt(id).await?;
    Ok(Json(ReceiptResponse::from(receipt)))
}

// POST /receipts - Create in Draft
#[instrument(skip(state, payload))]
pub async fn create_receipt(
    State(state): State<AppState>,
    Json(payload): Json<CreateReceiptRequest>,
) -> Result<(StatusCode, Json<ReceiptResponse>), AppError> {
    let receipt = state.inventory.create_receipt(payload).await?;
    Ok((StatusCode::CREATED, Json(ReceiptResponse::from(receipt))))
}

// POST /receipts/:id/validate - Draft/Waiting -> Done, stock in
#[instrument(skip(state), fields(id = %id))]
pub async fn validate_receipt(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<ReceiptResponse>, AppError> {
    let receipt = state.inventory.validate_receipt(id, auth.user_id).await?;
    Ok(Json(ReceiptResponse::from(receipt)))
}

// PATCH /receipts/:id/status
#[instrument(skip(state), fields(id = %id))]
pub async fn set_receipt_status(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<ReceiptResponse>, AppError> {
    let receipt = state
        .inventory
        .set_receipt_status(id, payload.status)
        .await?;
    Ok(Json(ReceiptResponse::from(receipt)))
}
