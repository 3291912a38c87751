use axum::{routing::get, routing::put, Router};

use crate::handlers::expense;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/expenses",
            get(expense::get_expenses).post(expense::create_expense),
        )
        .route(
            "/expenses/{id}",
            put(expense::update_expense).delete(expense::delete_expense),
        )
        .route_layer(axum::middleware::from_fn(require_auth))
}
