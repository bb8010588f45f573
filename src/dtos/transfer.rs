// src/dtos/transfer.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{DocumentLineResponse, NewDocumentLine};
use crate::models::document::{DocumentStatus, InternalTransfer};

#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub source_warehouse_id: Uuid,
    pub destination_warehouse_id: Uuid,
    pub lines: Vec<NewDocumentLine>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub id: Uuid,
    pub document_number: String,
    pub source_warehouse_id: Uuid,
    pub destination_warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub lines: Vec<DocumentLineResponse>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<InternalTransfer> for TransferResponse {
    fn from(transfer: InternalTransfer) -> Self {
        Self {
            id: transfer.id,
            document_number: transfer.document_number,
            source_warehouse_id: transfer.source_warehouse_id,
            destination_warehouse_id: transfer.destination_warehouse_id,
            status: transfer.status,
            lines: transfer.lines.into_iter().map(Into::into).collect(),
            created_at: transfer.created_at,
            validated_at: transfer.validated_at,
            notes: transfer.notes,
        }
    }
}
