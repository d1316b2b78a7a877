use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    students::{CreateStudentDto, CreatedStudent, StudentDetails, UpdateStudentDto},
    ids::StudentId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::records::{StatusTable, change_status};
use crate::validator::{Pagination, ValidatedJson};

use super::service::StudentService;

#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = CreatedStudent),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not a student", body = ErrorResponse),
        (status = 422, description = "Unknown referenced record", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<CreatedStudent>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedStudent {
            message: "Student created successfully".to_string(),
            student,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id" = StudentId, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = MutationResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn update_student(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<StudentId>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Student updated successfully",
        student.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated students", body = Page<StudentDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_students(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<StudentDetails>>, AppError> {
    let students = StudentService::get_students(&state.db).await?;
    Ok(Json(paginate_with(students, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = StudentId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = StudentDetails),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<StudentId>,
) -> Result<Json<StudentDetails>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    patch,
    path = "/api/v1/students/{id}/activate",
    params(("id" = StudentId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student activated", body = MutationResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn activate_student(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<StudentId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Students,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/students/{id}/deactivate",
    params(("id" = StudentId, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student deactivated", body = MutationResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_student(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<StudentId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Students,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}
