// src/dtos/product.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::product::{Product, ProductCategory, Uom};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub sku: String,
    pub name: String,
    pub category: ProductCategory,
    pub uom: Uom,
    pub reorder_level: i64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    pub uom: Option<Uom>,
    pub reorder_level: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub category: ProductCategory,
    pub uom: Uom,
    pub reorder_level: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            sku: product.sku,
            name: product.name,
            category: product.category,
            uom: product.uom,
            reorder_level: product.reorder_level,
            description: product.description,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WarehouseStockResponse {
    pub warehouse_id: Uuid,
    pub quantity: i64,
}

/// Product detail with its per-warehouse balances and total.
#[derive(Debug, Serialize)]
pub struct ProductStockResponse {
    pub product: ProductResponse,
    pub total_stock: i64,
    pub by_warehouse: Vec<WarehouseStockResponse>,
}
