// src/dtos/adjustment.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{AdjustmentLineResponse, NewAdjustmentLine};
use crate::models::document::{AdjustmentType, DocumentStatus, StockAdjustment};

#[derive(Debug, Deserialize)]
pub struct CreateAdjustmentRequest {
    pub warehouse_id: Uuid,
    pub adjustment_type: AdjustmentType,
    pub lines: Vec<NewAdjustmentLine>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdjustmentResponse {
    pub id: Uuid,
    pub document_number: String,
    pub warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub adjustment_type: AdjustmentType,
    pub lines: Vec<AdjustmentLineResponse>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<StockAdjustment> for AdjustmentResponse {
    fn from(adjustment: StockAdjustment) -> Self {
        Self {
            id: adjustment.id,
            document_number: adjustment.document_number,
            warehouse_id: adjustment.warehouse_id,
            status: adjustment.status,
            adjustment_type: adjustment.adjustment_type,
            lines: adjustment.lines.into_iter().map(Into::into).collect(),
            created_at: adjustment.created_at,
            validated_at: adjustment.validated_at,
            notes: adjustment.notes,
        }
    }
}
