// src/handlers/stock.rs
use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::dtos::stock::{StockBalanceResponse, StockQuery};
use crate::error::AppError;
use crate::state::AppState;

// GET /stock - Current balances, optionally filtered by product/warehouse
#[instrument(skip(state))]
pub async fn list_stock(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> Result<Json<Vec<StockBalanceResponse>>, AppError> {
    let balances = state.inventory.stock_levels(query).await;
    Ok(Json(
        balances
            .into_iter()
            .map(StockBalanceResponse::from)
            .collect(),
    ))
}
