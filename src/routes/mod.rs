pub mod adjustments;
pub mod deliveries;
pub mod products;
pub mod receipts;
pub mod stock;
pub mod transfers;
pub mod users;
pub mod warehouses;

use axum::Router;

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(warehouses::routes())
        .merge(receipts::routes())
        .merge(deliveries::routes())
        .merge(transfers::routes())
        .merge(adjustments::routes())
        .merge(stock::routes())
        .merge(users::routes())
}
