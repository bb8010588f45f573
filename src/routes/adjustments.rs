use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::handlers::adjustment::{
    create_adjustment, get_adjustment, list_adjustments, set_adjustment_status,
    validate_adjustment,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/adjustments", get(list_adjustments).post(create_adjustment))
        .route("/adjustments/{id}", get(get_adjustment))
        .route("/adjustments/{id}/validate", post(validate_adjustment))
        .route("/adjustments/{id}/status", patch(set_adjustment_status))
        .route_layer(middleware::from_fn(require_auth))
}
