use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::middleware::role::{require_auth, require_owner};
use crate::state::AppState;

use super::controller::{
    activate_academic_year, create_academic_year, deactivate_academic_year, get_academic_year,
    get_academic_years, update_academic_year,
};

pub fn init_academic_years_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_academic_year))
        .route("/{id}", put(update_academic_year))
        .route("/{id}/activate", patch(activate_academic_year))
        .route("/{id}/deactivate", patch(deactivate_academic_year))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let reads = Router::new()
        .route("/", get(get_academic_years))
        .route("/{id}", get(get_academic_year))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
