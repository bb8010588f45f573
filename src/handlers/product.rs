// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::dtos::product::{
    CreateProductRequest, ProductResponse, ProductStockResponse, UpdateProductRequest,
    WarehouseStockResponse,
};
use crate::error::AppError;
use crate::state::AppState;

// GET /products - List all products
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.inventory.products().await;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(id = %id))]
pub async fn get_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.inventory.product(id).await?;
    Ok(Json(ProductResponse::from(product)))
}

// GET /products/:id/stock - Product with per-warehouse balances
#[instrument(skip(state), fields(id = %id))]
pub async fn get_product_stock(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ProductStockResponse>, AppError> {
    let (product, balances, total) = state.inventory.stock_for_product(id).await?;
    Ok(Json(ProductStockResponse {
        product: ProductResponse::from(product),
        total_stock: total,
        by_warehouse: balances
            .into_iter()
            .map(|b| WarehouseStockResponse {
                warehouse_id: b.warehouse_id,
                quantity: b.quantity,
            })
            .collect(),
    }))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state.inventory.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/:id - Update product
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_product(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.inventory.update_product(id, payload).await?;
    Ok(Json(ProductResponse::from(product)))
}
