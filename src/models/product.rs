// src/models/product.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    Electronics,
    Furniture,
    Clothing,
    Food,
    Books,
    Tools,
    Other,
}

/// Unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Uom {
    Pcs,
    Kg,
    Lbs,
    Box,
    Carton,
    Dozen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    /// Unique business key, matched case-insensitively.
    pub sku: String,
    pub name: String,
    pub category: ProductCategory,
    pub uom: Uom,
    /// Total stock below this level flags the product as low-stock.
    pub reorder_level: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
