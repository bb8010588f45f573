// src/models/warehouse.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: Uuid,
    /// Unique code, stored trimmed and matched case-insensitively.
    pub code: String,
    pub name: String,
    pub address: String,
    pub racks: Vec<Rack>,
}

// Location hierarchy: Rack -> Section -> Bin. Identity only; stock
// operations track quantities per warehouse, not per bin.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    pub id: Uuid,
    pub name: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub bins: Vec<Bin>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub id: Uuid,
    pub name: String,
}

/// Current on-hand quantity for one (product, warehouse) pair.
/// Invariant: `quantity >= 0` at all times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBalance {
    pub product_id: Uuid,
    pub warehouse_id: Uuid,
    pub quantity: i64,
}
