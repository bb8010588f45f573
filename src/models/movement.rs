// src/models/movement.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::DocumentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementType {
    Receipt,
    Delivery,
    #[serde(rename = "Transfer In")]
    TransferIn,
    #[serde(rename = "Transfer Out")]
    TransferOut,
    Adjustment,
}

/// One immutable ledger entry. Entries are append-only and never mutated.
/// Invariant: `new_stock = previous_stock + quantity`, and `new_stock` equals
/// the stock balance observed immediately after the mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub movement_type: MovementType,
    pub document_type: DocumentKind,
    pub document_id: Uuid,
    pub document_number: String,
    /// Signed delta; negative for stock-decreasing movements.
    pub quantity: i64,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
    pub notes: Option<String>,
}
