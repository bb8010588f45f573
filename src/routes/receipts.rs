use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::handlers::receipt::{
    create_receipt, get_receipt, list_receipts, set_receipt_status, validate_receipt,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/receipts", get(list_receipts).post(create_receipt))
        .route("/receipts/{id}", get(get_receipt))
        .route("/receipts/{id}/validate", post(validate_receipt))
        .route("/receipts/{id}/status", patch(set_receipt_status))
        .route_layer(middleware::from_fn(require_auth))
}
