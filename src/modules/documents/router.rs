use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
};

use crate::middleware::role::{require_auth, require_owner};
use crate::state::AppState;

use super::controller::{
    activate_document, create_document, deactivate_document, get_document, get_documents,
};

pub fn init_documents_router(state: AppState) -> Router<AppState> {
    let writes = Router::new()
        .route("/", post(create_document))
        .route("/{id}/activate", patch(activate_document))
        .route("/{id}/deactivate", patch(deactivate_document))
        .layer(DefaultBodyLimit::max(state.storage_config.body_limit()))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));

    let reads = Router::new()
        .route("/", get(get_documents))
        .route("/{id}", get(get_document))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    writes.merge(reads)
}
