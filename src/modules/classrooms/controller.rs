use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    classrooms::{ClassroomDetails, CreateClassroomDto, CreatedClassroom, UpdateClassroomDto},
    ids::ClassroomId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::records::{StatusTable, change_status};
use crate::validator::{Pagination, ValidatedJson};

use super::service::ClassroomService;

#[utoipa::path(
    post,
    path = "/api/v1/classrooms",
    request_body = CreateClassroomDto,
    responses(
        (status = 201, description = "Classroom created", body = CreatedClassroom),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse),
        (status = 422, description = "Validation failed or unknown department", body = ErrorResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn create_classroom(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateClassroomDto>,
) -> Result<(StatusCode, Json<CreatedClassroom>), AppError> {
    let classroom = ClassroomService::create_classroom(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedClassroom {
            message: "Classroom created successfully".to_string(),
            classroom,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/classrooms/{id}",
    params(("id" = ClassroomId, Path, description = "Classroom ID")),
    request_body = UpdateClassroomDto,
    responses(
        (status = 200, description = "Classroom updated", body = MutationResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn update_classroom(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ClassroomId>,
    ValidatedJson(dto): ValidatedJson<UpdateClassroomDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let classroom = ClassroomService::update_classroom(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Classroom updated successfully",
        classroom.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/classrooms",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated classrooms", body = Page<ClassroomDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn get_classrooms(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<ClassroomDetails>>, AppError> {
    let classrooms = ClassroomService::get_classrooms(&state.db).await?;
    Ok(Json(paginate_with(classrooms, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/classrooms/{id}",
    params(("id" = ClassroomId, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Classroom details", body = ClassroomDetails),
        (status = 404, description = "Classroom not found", body = ErrorResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn get_classroom(
    State(state): State<AppState>,
    Path(id): Path<ClassroomId>,
) -> Result<Json<ClassroomDetails>, AppError> {
    let classroom = ClassroomService::get_classroom(&state.db, id).await?;
    Ok(Json(classroom))
}

#[utoipa::path(
    patch,
    path = "/api/v1/classrooms/{id}/activate",
    params(("id" = ClassroomId, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Classroom activated", body = MutationResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn activate_classroom(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ClassroomId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Classrooms,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/classrooms/{id}/deactivate",
    params(("id" = ClassroomId, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Classroom deactivated", body = MutationResponse),
        (status = 404, description = "Classroom not found", body = ErrorResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_classroom(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ClassroomId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Classrooms,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}
