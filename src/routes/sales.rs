use axum::{routing::get, Router};

use crate::handlers::sale;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(sale::get_sales).post(sale::create_daily_sale))
        .route_layer(axum::middleware::from_fn(require_auth))
}
