// src/store.rs
//
// Snapshot store: every collection lives in memory behind one RwLock and is
// rewritten to its own JSON file on every mutation. Collections are loaded
// at startup; a missing file means an empty collection.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::error::DomainError;
use crate::models::document::{
    Delivery, DocumentKind, InternalTransfer, Receipt, StockAdjustment,
};
use crate::models::movement::StockMovement;
use crate::models::otp::OtpRecord;
use crate::models::product::Product;
use crate::models::user::User;
use crate::models::warehouse::{StockBalance, Warehouse};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, serde_json::Error),
    #[error("failed to create data directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),
}

/// Per-kind monotonic document-number sequences, persisted with the rest of
/// the state so numbers survive restarts and never collide.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DocumentSequences {
    pub receipt: u64,
    pub delivery: u64,
    pub transfer: u64,
    pub adjustment: u64,
}

impl DocumentSequences {
    pub fn next(&mut self, kind: DocumentKind) -> u64 {
        let counter = match kind {
            DocumentKind::Receipt => &mut self.receipt,
            DocumentKind::Delivery => &mut self.delivery,
            DocumentKind::Internal => &mut self.transfer,
            DocumentKind::Adjustment => &mut self.adjustment,
        };
        *counter += 1;
        *counter
    }
}

/// One serialized collection per entity type.
#[derive(Debug, Default, Clone)]
pub struct StoreData {
    pub products: Vec<Product>,
    pub warehouses: Vec<Warehouse>,
    pub stock_balances: Vec<StockBalance>,
    pub receipts: Vec<Receipt>,
    pub deliveries: Vec<Delivery>,
    pub transfers: Vec<InternalTransfer>,
    pub adjustments: Vec<StockAdjustment>,
    pub movements: Vec<StockMovement>,
    pub users: Vec<User>,
    pub otps: Vec<OtpRecord>,
    pub sequences: DocumentSequences,
}

impl StoreData {
    /// Current balance for a (product, warehouse) pair; absent means zero.
    pub fn balance(&self, product_id: uuid::Uuid, warehouse_id: uuid::Uuid) -> i64 {
        self.stock_balances
            .iter()
            .find(|b| b.product_id == product_id && b.warehouse_id == warehouse_id)
            .map(|b| b.quantity)
            .unwrap_or(0)
    }

    /// Applies a signed delta, failing before any change when it would drive
    /// the balance negative.
    pub fn apply_delta(
        &mut self,
        product_id: uuid::Uuid,
        warehouse_id: uuid::Uuid,
        delta: i64,
    ) -> Result<i64, DomainError> {
        let current = self.balance(product_id, warehouse_id);
        let updated = current
            .checked_add(delta)
            .ok_or_else(|| DomainError::validation("Stock quantity out of range"))?;
        if updated < 0 {
            return Err(DomainError::InsufficientStock {
                available: current,
                required: -delta,
            });
        }
        match self
            .stock_balances
            .iter_mut()
            .find(|b| b.product_id == product_id && b.warehouse_id == warehouse_id)
        {
            Some(balance) => balance.quantity = updated,
            None => self.stock_balances.push(StockBalance {
                product_id,
                warehouse_id,
                quantity: updated,
            }),
        }
        Ok(updated)
    }

    /// Appends a ledger entry. Rejects malformed entries; never rejects for
    /// any other reason, and entries are never mutated afterwards.
    pub fn record_movement(&mut self, movement: StockMovement) -> Result<(), DomainError> {
        if movement.new_stock != movement.previous_stock + movement.quantity {
            return Err(DomainError::MalformedLedgerEntry);
        }
        self.movements.push(movement);
        Ok(())
    }
}

#[derive(Clone)]
pub struct Store {
    data: Arc<RwLock<StoreData>>,
    data_dir: Option<PathBuf>,
}

impl Store {
    /// Volatile store, used by tests and when no data directory is set.
    pub fn in_memory() -> Self {
        Self {
            data: Arc::new(RwLock::new(StoreData::default())),
            data_dir: None,
        }
    }

    /// Loads every collection snapshot found under `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::CreateDir(dir.clone(), e))?;

        let data = StoreData {
            products: load_collection(&dir, "products")?,
            warehouses: load_collection(&dir, "warehouses")?,
            stock_balances: load_collection(&dir, "stock_balances")?,
            receipts: load_collection(&dir, "receipts")?,
            deliveries: load_collection(&dir, "deliveries")?,
            transfers: load_collection(&dir, "transfers")?,
            adjustments: load_collection(&dir, "adjustments")?,
            movements: load_collection(&dir, "movements")?,
            users: load_collection(&dir, "users")?,
            otps: load_collection(&dir, "otps")?,
            sequences: load_value(&dir, "sequences")?.unwrap_or_default(),
        };

        Ok(Self {
            data: Arc::new(RwLock::new(data)),
            data_dir: Some(dir),
        })
    }

    /// Runs a read-only closure against the current state.
    pub async fn read<T>(&self, f: impl FnOnce(&StoreData) -> T) -> T {
        let guard = self.data.read().await;
        f(&guard)
    }

    /// Runs a mutation against a draft copy of the state. The draft replaces
    /// the live state only when the closure succeeds, so a multi-step
    /// mutation commits all of its changes or none of them. The write lock
    /// spans the whole call; concurrent mutations serialize here.
    pub async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreData) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut guard = self.data.write().await;
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        *guard = draft;
        self.persist(&guard).await;
        Ok(out)
    }

    // Rewrites every collection snapshot. Serialization happens under the
    // lock; the file writes run on a blocking thread, awaited while the lock
    // is still held so snapshots land in mutation order. Failures are logged
    // and do not fail the mutation; the in-memory state stays authoritative.
    async fn persist(&self, data: &StoreData) {
        let Some(dir) = &self.data_dir else { return };
        let mut files = Vec::new();
        stage_collection(&mut files, dir, "products", &data.products);
        stage_collection(&mut files, dir, "warehouses", &data.warehouses);
        stage_collection(&mut files, dir, "stock_balances", &data.stock_balances);
        stage_collection(&mut files, dir, "receipts", &data.receipts);
        stage_collection(&mut files, dir, "deliveries", &data.deliveries);
        stage_collection(&mut files, dir, "transfers", &data.transfers);
        stage_collection(&mut files, dir, "adjustments", &data.adjustments);
        stage_collection(&mut files, dir, "movements", &data.movements);
        stage_collection(&mut files, dir, "users", &data.users);
        stage_collection(&mut files, dir, "otps", &data.otps);
        stage_collection(&mut files, dir, "sequences", &data.sequences);

        let writes = tokio::task::spawn_blocking(move || {
            for (path, json) in files {
                if let Err(e) = fs::write(&path, json) {
                    tracing::error!(path = %path.display(), error = %e, "Failed to write snapshot");
                }
            }
        });
        if let Err(e) = writes.await {
            tracing::error!(error = %e, "Snapshot writer task failed");
        }
    }
}

fn load_collection<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, StoreError> {
    Ok(load_value(dir, name)?.unwrap_or_default())
}

fn load_value<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>, StoreError> {
    let path = dir.join(format!("{name}.json"));
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).map_err(|e| StoreError::Read(path.clone(), e))?;
    let value = serde_json::from_str(&raw).map_err(|e| StoreError::Parse(path, e))?;
    Ok(Some(value))
}

fn stage_collection<T: Serialize>(
    files: &mut Vec<(PathBuf, String)>,
    dir: &Path,
    name: &str,
    value: &T,
) {
    let path = dir.join(format!("{name}.json"));
    match serde_json::to_string(value) {
        Ok(json) => files.push((path, json)),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to serialize snapshot")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn apply_delta_rejects_negative_balance_without_mutating() {
        let store = Store::in_memory();
        let product = Uuid::new_v4();
        let warehouse = Uuid::new_v4();

        let err = store
            .mutate(|data| {
                data.apply_delta(product, warehouse, 10)?;
                data.apply_delta(product, warehouse, -25)?;
                Ok(())
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientStock {
                available: 10,
                required: 25
            }
        );
        // The whole mutation rolled back, including the +10.
        let balance = store.read(|data| data.balance(product, warehouse)).await;
        assert_eq!(balance, 0);
    }

    #[tokio::test]
    async fn apply_delta_rejects_overflow_instead_of_wrapping() {
        let store = Store::in_memory();
        let product = Uuid::new_v4();
        let warehouse = Uuid::new_v4();

        let err = store
            .mutate(|data| {
                data.apply_delta(product, warehouse, i64::MAX)?;
                data.apply_delta(product, warehouse, 1)?;
                Ok(())
            })
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::validation("Stock quantity out of range"));
        let balance = store.read(|data| data.balance(product, warehouse)).await;
        assert_eq!(balance, 0);
    }

    #[tokio::test]
    async fn snapshots_survive_a_reopen() {
        let dir = std::env::temp_dir().join(format!("store-test-{}", Uuid::new_v4()));
        let product = Uuid::new_v4();
        let warehouse = Uuid::new_v4();

        {
            let store = Store::open(&dir).unwrap();
            store
                .mutate(|data| {
                    data.apply_delta(product, warehouse, 7)?;
                    data.sequences.next(DocumentKind::Receipt);
                    Ok(())
                })
                .await
                .unwrap();
        }

        let reopened = Store::open(&dir).unwrap();
        let balance = reopened.read(|data| data.balance(product, warehouse)).await;
        assert_eq!(balance, 7);
        let next = reopened
            .mutate(|data| Ok(data.sequences.next(DocumentKind::Receipt)))
            .await
            .unwrap();
        assert_eq!(next, 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn sequences_are_monotonic_per_kind() {
        let store = Store::in_memory();
        let numbers = store
            .mutate(|data| {
                Ok(vec![
                    DocumentKind::Receipt.document_number(data.sequences.next(DocumentKind::Receipt)),
                    DocumentKind::Receipt.document_number(data.sequences.next(DocumentKind::Receipt)),
                    DocumentKind::Delivery
                        .document_number(data.sequences.next(DocumentKind::Delivery)),
                ])
            })
            .await
            .unwrap();
        assert_eq!(numbers, vec!["REC-000001", "REC-000002", "DEL-000001"]);
    }
}
