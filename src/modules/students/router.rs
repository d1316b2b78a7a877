use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_student};
use crate::state::AppState;

use super::controller::{
    activate_student, create_student, deactivate_student, get_student, get_students,
    update_student,
};

pub fn init_students_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_student))
        .route("/{id}", put(update_student))
        .route("/{id}/activate", patch(activate_student))
        .route("/{id}/deactivate", patch(deactivate_student))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_student));

    let reads = Router::new()
        .route("/", get(get_students))
        .route("/{id}", get(get_student))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
