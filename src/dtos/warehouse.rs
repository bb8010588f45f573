// src/dtos/warehouse.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::warehouse::{Rack, Warehouse};

#[derive(Debug, Deserialize)]
pub struct CreateWarehouseRequest {
    pub code: String,
    pub name: String,
    pub address: String,
    /// Optional location hierarchy; ids are assigned server-side.
    #[serde(default)]
    pub racks: Vec<NewRack>,
}

#[derive(Debug, Deserialize)]
pub struct NewRack {
    pub name: String,
    #[serde(default)]
    pub sections: Vec<NewSection>,
}

#[derive(Debug, Deserialize)]
pub struct NewSection {
    pub name: String,
    #[serde(default)]
    pub bins: Vec<NewBin>,
}

#[derive(Debug, Deserialize)]
pub struct NewBin {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWarehouseRequest {
    pub name: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WarehouseResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub address: String,
    pub racks: Vec<Rack>,
}

impl From<Warehouse> for WarehouseResponse {
    fn from(warehouse: Warehouse) -> Self {
        Self {
            id: warehouse.id,
            code: warehouse.code,
            name: warehouse.name,
            address: warehouse.address,
            racks: warehouse.racks,
        }
    }
}
