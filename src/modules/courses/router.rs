use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_owner};
use crate::state::AppState;

use super::controller::{
    activate_course, create_course, deactivate_course, get_course, get_courses,
    update_course,
};

pub fn init_courses_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_course))
        .route("/{id}", put(update_course))
        .route("/{id}/activate", patch(activate_course))
        .route("/{id}/deactivate", patch(deactivate_course))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let reads = Router::new()
        .route("/", get(get_courses))
        .route("/{id}", get(get_course))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
