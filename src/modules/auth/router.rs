use axum::{Router, middleware, routing::post};

use crate::middleware::rate_limit::auth_rate_limit;
use crate::state::AppState;

use super::controller::signup;

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route_layer(middleware::from_fn_with_state(state, auth_rate_limit))
}
