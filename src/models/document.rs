// src/models/document.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Draft,
    Waiting,
    Ready,
    Done,
    Canceled,
}

impl DocumentStatus {
    /// Done and Canceled are terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, DocumentStatus::Done | DocumentStatus::Canceled)
    }
}

/// Which kind of document produced a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Receipt,
    Delivery,
    Internal,
    Adjustment,
}

impl DocumentKind {
    /// Document-number prefix: `REC-000001`, `DEL-000001`, ...
    pub fn prefix(self) -> &'static str {
        match self {
            DocumentKind::Receipt => "REC",
            DocumentKind::Delivery => "DEL",
            DocumentKind::Internal => "TRF",
            DocumentKind::Adjustment => "ADJ",
        }
    }

    pub fn document_number(self, sequence: u64) -> String {
        format!("{}-{:06}", self.prefix(), sequence)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLine {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Requested count, always positive.
    pub quantity: i64,
    pub notes: Option<String>,
}

/// Adjustment lines carry the counted reality next to the book value;
/// `difference = physical - recorded` is the signed delta applied to stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    pub id: Uuid,
    pub product_id: Uuid,
    pub recorded_quantity: i64,
    pub physical_quantity: i64,
    pub difference: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentType {
    #[serde(rename = "Physical Count")]
    PhysicalCount,
    Damage,
    Loss,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub document_number: String,
    pub vendor_name: String,
    pub vendor_contact: Option<String>,
    pub warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub lines: Vec<DocumentLine>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Uuid,
    pub document_number: String,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub lines: Vec<DocumentLine>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalTransfer {
    pub id: Uuid,
    pub document_number: String,
    pub source_warehouse_id: Uuid,
    pub destination_warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub lines: Vec<DocumentLine>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAdjustment {
    pub id: Uuid,
    pub document_number: String,
    pub warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub adjustment_type: AdjustmentType,
    pub lines: Vec<AdjustmentLine>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
