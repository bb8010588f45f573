use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::handlers::delivery::{
    create_delivery, get_delivery, list_deliveries, set_delivery_status, validate_delivery,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/deliveries", get(list_deliveries).post(create_delivery))
        .route("/deliveries/{id}", get(get_delivery))
        .route("/deliveries/{id}/validate", post(validate_delivery))
        .route("/deliveries/{id}/status", patch(set_delivery_status))
        .route_layer(middleware::from_fn(require_auth))
}
