use axum::{middleware, routing::get, Router};

use crate::handlers::dashboard::get_dashboard;
use crate::handlers::movement::list_movements;
use crate::handlers::stock::list_stock;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stock", get(list_stock))
        .route("/movements", get(list_movements))
        .route("/dashboard", get(get_dashboard))
        .route_layer(middleware::from_fn(require_auth))
}
