use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::handlers::warehouse::{create_warehouse, get_warehouse, list_warehouses, update_warehouse};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/warehouses", get(list_warehouses).post(create_warehouse))
        .route("/warehouses/{id}", get(get_warehouse).put(update_warehouse))
        .route_layer(middleware::from_fn(require_auth))
}
