use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::handlers::transfer::{
    create_transfer, get_transfer, list_transfers, set_transfer_status, validate_transfer,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transfers", get(list_transfers).post(create_transfer))
        .route("/transfers/{id}", get(get_transfer))
        .route("/transfers/{id}/validate", post(validate_transfer))
        .route("/transfers/{id}/status", patch(set_transfer_status))
        .route_layer(middleware::from_fn(require_auth))
}
