// src/dtos/receipt.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{DocumentLineResponse, NewDocumentLine};
use crate::models::document::{DocumentStatus, Receipt};

#[derive(Debug, Deserialize)]
pub struct CreateReceiptRequest {
    pub vendor_name: String,
    pub vendor_contact: Option<String>,
    pub warehouse_id: Uuid,
    pub lines: Vec<NewDocumentLine>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub id: Uuid,
    pub document_number: String,
    pub vendor_name: String,
    pub vendor_contact: Option<String>,
    pub warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub lines: Vec<DocumentLineResponse>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            id: receipt.id,
            document_number: receipt.document_number,
            vendor_name: receipt.vendor_name,
            vendor_contact: receipt.vendor_contact,
            warehouse_id: receipt.warehouse_id,
            status: receipt.status,
            lines: receipt.lines.into_iter().map(Into::into).collect(),
            created_at: receipt.created_at,
            validated_at: receipt.validated_at,
            notes: receipt.notes,
        }
    }
}
