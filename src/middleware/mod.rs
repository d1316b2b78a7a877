//! Request middleware and extractors.
//!
//! 1. The client sends `Authorization: Bearer <token>`.
//! 2. A guard from [`role`] verifies the token, loads the user and checks
//!    its account type.
//! 3. The guard stores a [`auth::CurrentUser`] in the request extensions,
//!    which handlers take as an extractor.
//!
//! ```ignore
//! use axum::{Router, middleware, routing::post};
//! use crate::middleware::role::require_owner;
//!
//! let writes = Router::new()
//!     .route("/", post(create_faculty))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_owner));
//! ```

pub mod auth;
pub mod rate_limit;
pub mod role;
