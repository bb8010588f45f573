// src/state.rs
use std::sync::Arc;

use crate::mailer::Mailer;
use crate::services::inventory::InventoryService;
use crate::services::otp::OtpService;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub inventory: InventoryService,
    pub otp: OtpService,
}

impl AppState {
    pub fn new(store: Store, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            inventory: InventoryService::new(store.clone()),
            otp: OtpService::new(store.clone(), mailer),
            store,
        }
    }
}
