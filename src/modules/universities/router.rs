use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_owner};
use crate::state::AppState;

use super::controller::{
    activate_university, create_university, deactivate_university, get_universities,
    get_university, get_university_classrooms, get_university_departments,
    get_university_faculties, get_university_professors, get_university_students,
    update_university,
};

pub fn init_universities_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_university))
        .route("/{id}", put(update_university))
        .route("/{id}/activate", patch(activate_university))
        .route("/{id}/deactivate", patch(deactivate_university))
        .layer(DefaultBodyLimit::max(state.storage_config.body_limit()))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let reads = Router::new()
        .route("/", get(get_universities))
        .route("/{id}", get(get_university))
        .route("/{id}/faculties", get(get_university_faculties))
        .route("/{id}/departments", get(get_university_departments))
        .route("/{id}/classrooms", get(get_university_classrooms))
        .route("/{id}/professors", get(get_university_professors))
        .route("/{id}/students", get(get_university_students))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
