use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_owner};
use crate::state::AppState;

use super::controller::{
    activate_classroom, create_classroom, deactivate_classroom, get_classroom, get_classrooms,
    update_classroom,
};

pub fn init_classrooms_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_classroom))
        .route("/{id}", put(update_classroom))
        .route("/{id}/activate", patch(activate_classroom))
        .route("/{id}/deactivate", patch(deactivate_classroom))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let reads = Router::new()
        .route("/", get(get_classrooms))
        .route("/{id}", get(get_classroom))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
