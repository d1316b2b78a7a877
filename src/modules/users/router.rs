use axum::{Router, middleware, routing::get};

use crate::middleware::role::{require_admin, require_auth};
use crate::state::AppState;

use super::controller::{get_profile, get_users, update_profile};

pub fn init_users_router(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .route("/", get(get_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let me = Router::new()
        .route("/me", get(get_profile).put(update_profile))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    admin.merge(me)
}
