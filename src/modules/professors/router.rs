use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_professor};
use crate::state::AppState;

use super::controller::{
    activate_professor, create_professor, deactivate_professor, get_professor,
    get_professor_classrooms, get_professor_courses, get_professors, update_professor,
};

pub fn init_professors_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_professor))
        .route("/{id}", put(update_professor))
        .route("/{id}/activate", patch(activate_professor))
        .route("/{id}/deactivate", patch(deactivate_professor))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_professor));

    let reads = Router::new()
        .route("/", get(get_professors))
        .route("/{id}", get(get_professor))
        .route("/{id}/courses", get(get_professor_courses))
        .route("/{id}/classrooms", get(get_professor_classrooms))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
