// src/handlers/delivery.rs
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::dtos::delivery::{CreateDeliveryRequest, DeliveryResponse};
use crate::dtos::document::SetStatusRequest;
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

// GET /deliveries
#[instrument(skip(state))]
pub async fn list_deliveries(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeliveryResponse>>, AppError> {
    let deliveries = state.inventory.deliveries().await;
    Ok(Json(
        deliveries.into_iter().map(DeliveryResponse::from).collect(),
    ))
}

// GET /deliveries/:id
#[instrument(skip(state), fields(id = %id))]
pub async fn get_delivery(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<DeliveryResponse>, AppError> {
    let delivery = state.inventory.delivery(id).await?;
    Ok(Json(DeliveryResponse::from(delivery)))
}

// POST /deliveries - Create in Draft
#[instrument(skip(state, payload))]
pub async fn create_delivery(
    State(state): State<AppState>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> Result<(StatusCode, Json<DeliveryResponse>), AppError> {
    let delivery = state.inventory.create_delivery(payload).await?;
    Ok((StatusCode::CREATED, Json(DeliveryResponse::from(delivery))))
}

// POST /deliveries/:id/validate - Ready -> Done, stock out
#[instrument(skip(state), fields(id = %id))]
pub async fn validate_delivery(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<DeliveryResponse>, AppError> {
    let delivery = state.inventory.validate_delivery(id, auth.user_id).await?;
    Ok(Json(DeliveryResponse::from(delivery)))
}

// PATCH /deliveries/:id/status
#[instrument(skip(state), fields(id = %id))]
pub async fn set_delivery_status(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<SetStatusRequest>,
) -> Result<Json<DeliveryResponse>, AppError> {
    let delivery = state
        .inventory
        .set_delivery_status(id, payload.status)
        .await?;
    Ok(Json(DeliveryResponse::from(delivery)))
}
