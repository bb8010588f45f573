// src/handlers/movement.rs
use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::dtos::movement::{MovementQuery, MovementResponse};
use crate::error::AppError;
use crate::state::AppState;

// GET /movements - Ledger history, newest first
#[instrument(skip(state))]
pub async fn list_movements(
    State(state): State<AppState>,
    Query(query): Query<MovementQuery>,
) -> Result<Json<Vec<MovementResponse>>, AppError> {
    let movements = state.inventory.movements(query).await;
    Ok(Json(
        movements.into_iter().map(MovementResponse::from).collect(),
    ))
}
