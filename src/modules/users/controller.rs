use axum::{Json, extract::State};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse,
    users::{UpdateProfileDto, UserProfile},
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::{Pagination, ValidatedJson};

use super::service::UserService;

/// List every account (admin only).
#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated users", body = Page<UserProfile>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_users(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<UserProfile>>, AppError> {
    let users = UserService::get_users(&state.db).await?;
    Ok(Json(paginate_with(users, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Profile of the caller", body = UserProfile),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<UserProfile>, AppError> {
    let user = UserService::get_user(&state.db, current_user.id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = MutationResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let user = UserService::update_profile(&state.db, current_user.id, dto).await?;

    Ok(Json(MutationResponse::new(
        "Profile updated successfully",
        user.id,
        current_user.account_type,
    )))
}
