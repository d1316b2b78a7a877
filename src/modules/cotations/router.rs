use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::{require_auth, require_professor};
use crate::state::AppState;

use super::controller::{create_cotation, get_cotation, get_cotations, update_cotation};

pub fn init_cotations_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_cotation))
        .route("/{id}", put(update_cotation))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_professor));

    let reads = Router::new()
        .route("/", get(get_cotations))
        .route("/{id}", get(get_cotation))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
