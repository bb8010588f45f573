// src/handlers/warehouse.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::dtos::warehouse::{CreateWarehouseRequest, UpdateWarehouseRequest, WarehouseResponse};
use crate::error::AppError;
use crate::state::AppState;

// GET /warehouses - List all warehouses
#[instrument(skip(state))]
pub async fn list_warehouses(
    State(state): State<AppState>,
) -> Result<Json<Vec<WarehouseResponse>>, AppError> {
    let warehouses = state.inventory.warehouses().await;
    Ok(Json(
        warehouses.into_iter().map(WarehouseResponse::from).collect(),
    ))
}

// GET /warehouses/:id - Get single warehouse
#[instrument(skip(state), fields(id = %id))]
pub async fn get_warehouse(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<WarehouseResponse>, AppError> {
    let warehouse = state.inventory.warehouse(id).await?;
    Ok(Json(WarehouseResponse::from(warehouse)))
}

// POST /warehouses - Create new warehouse
#[instrument(skip(state, payload))]
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(payload): Json<CreateWarehouseRequest>,
) -> Result<(StatusCode, Json<WarehouseResponse>), AppError> {
    let warehouse = state.inventory.create_warehouse(payload).await?;
    Ok((StatusCode::CREATED, Json(WarehouseResponse::from(warehouse))))
}

// PUT /warehouses/:id - Update name/address
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_warehouse(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateWarehouseRequest>,
) -> Result<Json<WarehouseResponse>, AppError> {
    let warehouse = state.inventory.update_warehouse(id, payload).await?;
    Ok(Json(WarehouseResponse::from(warehouse)))
}
