use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    courses::{CourseDetails, CourseDto, CreatedCourse},
    ids::CourseId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::records::{StatusTable, change_status};
use crate::validator::{Pagination, ValidatedJson};

use super::service::CourseService;

#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseDto,
    responses(
        (status = 201, description = "Course created", body = CreatedCourse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse),
        (status = 422, description = "Validation failed or unknown classroom or professor", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<(StatusCode, Json<CreatedCourse>), AppError> {
    let course = CourseService::create_course(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedCourse {
            message: "Course created successfully".to_string(),
            course,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id" = CourseId, Path, description = "Course ID")),
    request_body = CourseDto,
    responses(
        (status = 200, description = "Course updated", body = MutationResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn update_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CourseId>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Course updated successfully",
        course.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated courses", body = Page<CourseDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn get_courses(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<CourseDetails>>, AppError> {
    let courses = CourseService::get_courses(&state.db).await?;
    Ok(Json(paginate_with(courses, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id" = CourseId, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseDetails),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<CourseId>,
) -> Result<Json<CourseDetails>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}/activate",
    params(("id" = CourseId, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course activated", body = MutationResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn activate_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Courses,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}/deactivate",
    params(("id" = CourseId, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deactivated", body = MutationResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CourseId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Courses,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}
