// src/dtos/stock.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::warehouse::StockBalance;

#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct StockBalanceResponse {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i64,
}

impl From<StockBalance> for StockBalanceResponse {
    fn from(balance: StockBalance) -> Self {
        Self {
            product_id: balance.product_id,
            warehouse_id: balance.warehouse_id,
            quantity: balance.quantity,
        }
    }
}
