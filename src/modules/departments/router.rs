use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_owner};
use crate::state::AppState;

use super::controller::{
    activate_department, create_department, deactivate_department, get_department,
    get_department_classrooms, get_departments, update_department,
};

pub fn init_departments_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_department))
        .route("/{id}", put(update_department))
        .route("/{id}/activate", patch(activate_department))
        .route("/{id}/deactivate", patch(deactivate_department))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let reads = Router::new()
        .route("/", get(get_departments))
        .route("/{id}", get(get_department))
        .route("/{id}/classrooms", get(get_department_classrooms))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
