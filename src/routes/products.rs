use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::product::{
    create_product, get_product, get_product_stock, list_products, update_product,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // All routes require authentication
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", get(get_product).put(update_product))
        .route("/products/{id}/stock", get(get_product_stock))
        .route_layer(middleware::from_fn(require_auth))
}
