// src/dtos/dashboard.rs
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub pending_receipts: usize,
    pub pending_deliveries: usize,
    pub scheduled_transfers: usize,
}
