// src/dtos/movement.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::DocumentKind;
use crate::models::movement::{MovementType, StockMovement};

/// Ledger query filters; all optional, combined with AND.
#[derive(Debug, Default, Deserialize)]
pub struct MovementQuery {
    pub product_id: Option<Uuid>,
    pub warehouse_id: Option<Uuid>,
    pub movement_type: Option<MovementType>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct MovementResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub movement_type: MovementType,
    pub document_type: DocumentKind,
    pub document_id: Uuid,
    pub document_number: String,
    pub quantity: i64,
    pub previous_stock: i64,
    pub new_stock: i64,
    pub timestamp: DateTime<Utc>,
    pub user_id: Uuid,
    pub notes: Option<String>,
}

impl From<StockMovement> for MovementResponse {
    fn from(m: StockMovement) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            warehouse_id: m.warehouse_id,
            movement_type: m.movement_type,
            document_type: m.document_type,
            document_id: m.document_id,
            document_number: m.document_number,
            quantity: m.quantity,
            previous_stock: m.previous_stock,
            new_stock: m.new_stock,
            timestamp: m.timestamp,
            user_id: m.user_id,
            notes: m.notes,
        }
    }
}
