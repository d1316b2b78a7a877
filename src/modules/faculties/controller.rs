use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    faculties::{CreateFacultyDto, CreatedFaculty, FacultyDetails, UpdateFacultyDto},
    ids::FacultyId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::records::{StatusTable, change_status};
use crate::validator::{Pagination, ValidatedJson};

use super::service::FacultyService;

#[utoipa::path(
    post,
    path = "/api/v1/faculties",
    request_body = CreateFacultyDto,
    responses(
        (status = 201, description = "Faculty created", body = CreatedFaculty),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse),
        (status = 422, description = "Validation failed or unknown university", body = ErrorResponse)
    ),
    tag = "Faculties",
    security(("bearer_auth" = []))
)]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateFacultyDto>,
) -> Result<(StatusCode, Json<CreatedFaculty>), AppError> {
    let faculty = FacultyService::create_faculty(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedFaculty {
            message: "Faculty created successfully".to_string(),
            faculty,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/faculties/{id}",
    params(("id" = FacultyId, Path, description = "Faculty ID")),
    request_body = UpdateFacultyDto,
    responses(
        (status = 200, description = "Faculty updated", body = MutationResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Faculties",
    security(("bearer_auth" = []))
)]
pub async fn update_faculty(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<FacultyId>,
    ValidatedJson(dto): ValidatedJson<UpdateFacultyDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let faculty = FacultyService::update_faculty(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Faculty updated successfully",
        faculty.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/faculties",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated faculties", body = Page<FacultyDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Faculties",
    security(("bearer_auth" = []))
)]
pub async fn get_faculties(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<FacultyDetails>>, AppError> {
    let faculties = FacultyService::get_faculties(&state.db).await?;
    Ok(Json(paginate_with(faculties, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/faculties/{id}",
    params(("id" = FacultyId, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty details", body = FacultyDetails),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Faculties",
    security(("bearer_auth" = []))
)]
pub async fn get_faculty(
    State(state): State<AppState>,
    Path(id): Path<FacultyId>,
) -> Result<Json<FacultyDetails>, AppError> {
    let faculty = FacultyService::get_faculty(&state.db, id).await?;
    Ok(Json(faculty))
}

#[utoipa::path(
    patch,
    path = "/api/v1/faculties/{id}/activate",
    params(("id" = FacultyId, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty activated", body = MutationResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Faculties",
    security(("bearer_auth" = []))
)]
pub async fn activate_faculty(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<FacultyId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Faculties,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/faculties/{id}/deactivate",
    params(("id" = FacultyId, Path, description = "Faculty ID")),
    responses(
        (status = 200, description = "Faculty deactivated", body = MutationResponse),
        (status = 404, description = "Faculty not found", body = ErrorResponse)
    ),
    tag = "Faculties",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_faculty(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<FacultyId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Faculties,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}
