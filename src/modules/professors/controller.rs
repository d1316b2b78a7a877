use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    classrooms::ClassroomDetails,
    courses::CourseDetails,
    professors::{CreateProfessorDto, CreatedProfessor, ProfessorDetails, UpdateProfessorDto},
    ids::ProfessorId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::records::{StatusTable, change_status};
use crate::validator::{Pagination, ValidatedJson};

use crate::modules::classrooms::service::ClassroomService;
use crate::modules::courses::service::CourseService;

use super::service::ProfessorService;

#[utoipa::path(
    post,
    path = "/api/v1/professors",
    request_body = CreateProfessorDto,
    responses(
        (status = 201, description = "Professor created", body = CreatedProfessor),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not a professor", body = ErrorResponse),
        (status = 422, description = "Unknown referenced record", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn create_professor(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateProfessorDto>,
) -> Result<(StatusCode, Json<CreatedProfessor>), AppError> {
    let professor = ProfessorService::create_professor(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedProfessor {
            message: "Professor created successfully".to_string(),
            professor,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/professors/{id}",
    params(("id" = ProfessorId, Path, description = "Professor ID")),
    request_body = UpdateProfessorDto,
    responses(
        (status = 200, description = "Professor updated", body = MutationResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn update_professor(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ProfessorId>,
    ValidatedJson(dto): ValidatedJson<UpdateProfessorDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let professor = ProfessorService::update_professor(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Professor updated successfully",
        professor.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/professors",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated professors", body = Page<ProfessorDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn get_professors(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<ProfessorDetails>>, AppError> {
    let professors = ProfessorService::get_professors(&state.db).await?;
    Ok(Json(paginate_with(professors, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/professors/{id}",
    params(("id" = ProfessorId, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor details", body = ProfessorDetails),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn get_professor(
    State(state): State<AppState>,
    Path(id): Path<ProfessorId>,
) -> Result<Json<ProfessorDetails>, AppError> {
    let professor = ProfessorService::get_professor(&state.db, id).await?;
    Ok(Json(professor))
}

#[utoipa::path(
    patch,
    path = "/api/v1/professors/{id}/activate",
    params(("id" = ProfessorId, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor activated", body = MutationResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn activate_professor(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ProfessorId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Professors,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/professors/{id}/deactivate",
    params(("id" = ProfessorId, Path, description = "Professor ID")),
    responses(
        (status = 200, description = "Professor deactivated", body = MutationResponse),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_professor(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ProfessorId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Professors,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/professors/{id}/courses",
    params(("id" = ProfessorId, Path, description = "Professor ID"), PaginationParams),
    responses(
        (status = 200, description = "Courses taught by the professor", body = Page<CourseDetails>),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn get_professor_courses(
    State(state): State<AppState>,
    Path(id): Path<ProfessorId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<CourseDetails>>, AppError> {
    ProfessorService::ensure_exists(&state.db, id).await?;
    let courses = CourseService::get_courses_by_professor(&state.db, id).await?;
    Ok(Json(paginate_with(courses, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/professors/{id}/classrooms",
    params(("id" = ProfessorId, Path, description = "Professor ID"), PaginationParams),
    responses(
        (status = 200, description = "Distinct classrooms of the professor's courses", body = Page<ClassroomDetails>),
        (status = 404, description = "Professor not found", body = ErrorResponse)
    ),
    tag = "Professors",
    security(("bearer_auth" = []))
)]
pub async fn get_professor_classrooms(
    State(state): State<AppState>,
    Path(id): Path<ProfessorId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<ClassroomDetails>>, AppError> {
    ProfessorService::ensure_exists(&state.db, id).await?;
    let classrooms = ClassroomService::get_classrooms_by_professor(&state.db, id).await?;
    Ok(Json(paginate_with(classrooms, &params)))
}
