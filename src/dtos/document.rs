// src/dtos/document.rs
//
// Line DTOs shared by the four document kinds.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::document::{AdjustmentLine, DocumentLine, DocumentStatus};

#[derive(Debug, Deserialize)]
pub struct NewDocumentLine {
    pub product_id: Uuid,
    pub quantity: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewAdjustmentLine {
    pub product_id: Uuid,
    pub recorded_quantity: i64,
    pub physical_quantity: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl From<DocumentLine> for DocumentLineResponse {
    fn from(line: DocumentLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            quantity: line.quantity,
            notes: line.notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdjustmentLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub recorded_quantity: i64,
    pub physical_quantity: i64,
    pub difference: i64,
    pub notes: Option<String>,
}

impl From<AdjustmentLine> for AdjustmentLineResponse {
    fn from(line: AdjustmentLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            recorded_quantity: line.recorded_quantity,
            physical_quantity: line.physical_quantity,
            difference: line.difference,
            notes: line.notes,
        }
    }
}

/// Moves a document between pre-validation statuses. Done is reachable only
/// through the validate endpoint.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: DocumentStatus,
}
