use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::user;
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    // Authentication routes are public; /users/me requires a token.
    let open = Router::new()
        .route("/signup", post(user::signup))
        .route("/login", post(user::login))
        .route("/forgot-password", post(user::forgot_password))
        .route("/reset-password/{token}", patch(user::reset_password));

    let protected = Router::new()
        .route("/users/me", get(user::get_me))
        .route_layer(axum::middleware::from_fn(require_auth));

    open.merge(protected)
}
