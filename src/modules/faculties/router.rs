use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_owner};
use crate::state::AppState;

use super::controller::{
    activate_faculty, create_faculty, deactivate_faculty, get_faculties, get_faculty,
    update_faculty,
};

pub fn init_faculties_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_faculty))
        .route("/{id}", put(update_faculty))
        .route("/{id}/activate", patch(activate_faculty))
        .route("/{id}/deactivate", patch(deactivate_faculty))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let reads = Router::new()
        .route("/", get(get_faculties))
        .route("/{id}", get(get_faculty))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
