// src/dtos/delivery.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{DocumentLineResponse, NewDocumentLine};
use crate::models::document::{Delivery, DocumentStatus};

#[derive(Debug, Deserialize)]
pub struct CreateDeliveryRequest {
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub warehouse_id: Uuid,
    pub lines: Vec<NewDocumentLine>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub id: Uuid,
    pub document_number: String,
    pub customer_name: String,
    pub customer_contact: Option<String>,
    pub warehouse_id: Uuid,
    pub status: DocumentStatus,
    pub lines: Vec<DocumentLineResponse>,
    pub created_at: DateTime<Utc>,
    pub validated_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<Delivery> for DeliveryResponse {
    fn from(delivery: Delivery) -> Self {
        Self {
            id: delivery.id,
            document_number: delivery.document_number,
            customer_name: delivery.customer_name,
            customer_contact: delivery.customer_contact,
            warehouse_id: delivery.warehouse_id,
            status: delivery.status,
            lines: delivery.lines.into_iter().map(Into::into).collect(),
            created_at: delivery.created_at,
            validated_at: delivery.validated_at,
            notes: delivery.notes,
        }
    }
}
