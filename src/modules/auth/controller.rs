use axum::{Json, extract::State, http::StatusCode};
use unidocs_core::{AppError, errors::ErrorResponse};
use unidocs_models::users::{SignupDto, SignupResponse};

use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Malformed body or email already in use", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 429, description = "Too many requests", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<SignupDto>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let uid = AuthService::signup(&state.db, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            uid,
        }),
    ))
}
