pub mod expenses;
pub mod products;
pub mod sales;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(products::routes())
        .merge(sales::routes())
        .merge(expenses::routes())
}
