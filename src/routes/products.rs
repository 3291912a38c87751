use axum::{
    routing::{get, patch},
    Router,
};

use crate::handlers::product::{
    create_product, delete_product, get_product, get_products, restock_product,
    search_by_price_range, update_product,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_products).post(create_product))
        .route("/products/search", get(search_by_price_range))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/{id}/restock", patch(restock_product))
        .route_layer(axum::middleware::from_fn(require_auth))
}
