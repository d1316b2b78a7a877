use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use unidocs_core::AppError;
use unidocs_models::MessageResponse;
use unidocs_observability::{logging_middleware, metrics_middleware};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::middleware::rate_limit::general_rate_limit;
use crate::modules::academic_years::router::init_academic_years_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::classrooms::router::init_classrooms_router;
use crate::modules::cotations::router::init_cotations_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::departments::router::init_departments_router;
use crate::modules::documents::router::init_documents_router;
use crate::modules::faculties::router::init_faculties_router;
use crate::modules::professors::router::init_professors_router;
use crate::modules::students::router::init_students_router;
use crate::modules::universities::router::init_universities_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to the university documents backend";

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = MessageResponse)),
    tag = "Root"
)]
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new(WELCOME_MESSAGE))
}

async fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("No resource found."))
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

fn api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", init_auth_router(state.clone()))
        .nest("/users", init_users_router(state.clone()))
        .nest("/universities", init_universities_router(state.clone()))
        .nest("/faculties", init_faculties_router(state.clone()))
        .nest("/departments", init_departments_router(state.clone()))
        .nest("/classrooms", init_classrooms_router(state.clone()))
        .nest("/academic-years", init_academic_years_router(state.clone()))
        .nest("/courses", init_courses_router(state.clone()))
        .nest("/professors", init_professors_router(state.clone()))
        .nest("/students", init_students_router(state.clone()))
        .nest("/cotations", init_cotations_router(state.clone()))
        .nest("/documents", init_documents_router(state.clone()))
        .layer(middleware::from_fn_with_state(state, general_rate_limit))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let uploads = ServeDir::new(&state.storage_config.root_dir);

    Router::new()
        .route("/", get(welcome))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api/v1", api_router(state.clone()))
        .nest_service("/files", uploads)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
