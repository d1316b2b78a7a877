use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    classrooms::ClassroomDetails,
    departments::DepartmentDetails,
    faculties::FacultyDetails,
    ids::UniversityId,
    professors::ProfessorDetails,
    students::StudentDetails,
    universities::{CreatedUniversity, UniversityDetails, UniversityForm, UniversityMultipart},
};

use crate::middleware::auth::CurrentUser;
use crate::modules::classrooms::service::ClassroomService;
use crate::modules::departments::service::DepartmentService;
use crate::modules::faculties::service::FacultyService;
use crate::modules::professors::service::ProfessorService;
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::multipart::MultipartForm;
use crate::utils::records::{StatusTable, change_status};
use crate::utils::uploads::{StoredFile, remove_files, remove_url, store_file};
use crate::validator::Pagination;

use super::service::UniversityService;

const LOGO_FIELD: &str = "images";

/// Reads the form and stores the optional logo.
async fn read_form(
    state: &AppState,
    multipart: Multipart,
) -> Result<(UniversityForm, Option<StoredFile>), AppError> {
    let form = MultipartForm::read(multipart, state.storage_config.max_file_bytes).await?;
    let fields: UniversityForm = form.parse()?;

    let logo = match form.files_in(LOGO_FIELD, 1)?.first() {
        Some(file) => Some(store_file(state.storage.as_ref(), "universities", file).await?),
        None => None,
    };

    Ok((fields, logo))
}

async fn discard_logo(state: &AppState, logo: Option<StoredFile>) {
    if let Some(logo) = logo {
        remove_files(state.storage.as_ref(), &[logo]).await;
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/universities",
    request_body(content = UniversityMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "University created", body = CreatedUniversity),
        (status = 400, description = "Malformed form", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse),
        (status = 413, description = "Logo too large", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn create_university(
    State(state): State<AppState>,
    current_user: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedUniversity>), AppError> {
    let (form, logo) = read_form(&state, multipart).await?;

    let logo_url = logo.as_ref().map(|l| l.url.as_str());
    match UniversityService::create_university(&state.db, current_user.id, form, logo_url).await {
        Ok(university) => Ok((
            StatusCode::CREATED,
            Json(CreatedUniversity {
                message: "University created successfully".to_string(),
                university,
            }),
        )),
        Err(e) => {
            discard_logo(&state, logo).await;
            Err(e)
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/universities/{id}",
    params(("id" = UniversityId, Path, description = "University ID")),
    request_body(content = UniversityMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "University updated", body = MutationResponse),
        (status = 403, description = "Caller does not own this university", body = ErrorResponse),
        (status = 404, description = "University not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn update_university(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<UniversityId>,
    multipart: Multipart,
) -> Result<Json<MutationResponse>, AppError> {
    UniversityService::ensure_owner(&state.db, id, current_user.id).await?;
    let (form, logo) = read_form(&state, multipart).await?;

    let logo_url = logo.as_ref().map(|l| l.url.as_str());
    match UniversityService::update_university(&state.db, id, form, logo_url).await {
        Ok((university, replaced)) => {
            if let Some(old_logo) = replaced {
                remove_url(state.storage.as_ref(), &old_logo).await;
            }
            Ok(Json(MutationResponse::new(
                "University updated successfully",
                university.id,
                current_user.account_type,
            )))
        }
        Err(e) => {
            discard_logo(&state, logo).await;
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/universities",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated universities", body = Page<UniversityDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn get_universities(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<UniversityDetails>>, AppError> {
    let universities = UniversityService::get_universities(&state.db).await?;
    Ok(Json(paginate_with(universities, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}",
    params(("id" = UniversityId, Path, description = "University ID")),
    responses(
        (status = 200, description = "University details", body = UniversityDetails),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn get_university(
    State(state): State<AppState>,
    Path(id): Path<UniversityId>,
) -> Result<Json<UniversityDetails>, AppError> {
    let university = UniversityService::get_university(&state.db, id).await?;
    Ok(Json(university))
}

#[utoipa::path(
    patch,
    path = "/api/v1/universities/{id}/activate",
    params(("id" = UniversityId, Path, description = "University ID")),
    responses(
        (status = 200, description = "University activated", body = MutationResponse),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn activate_university(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<UniversityId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Universities,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/universities/{id}/deactivate",
    params(("id" = UniversityId, Path, description = "University ID")),
    responses(
        (status = 200, description = "University deactivated", body = MutationResponse),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_university(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<UniversityId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Universities,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}/faculties",
    params(("id" = UniversityId, Path, description = "University ID"), PaginationParams),
    responses(
        (status = 200, description = "Faculties of the university", body = Page<FacultyDetails>),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn get_university_faculties(
    State(state): State<AppState>,
    Path(id): Path<UniversityId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<FacultyDetails>>, AppError> {
    UniversityService::ensure_exists(&state.db, id).await?;
    let faculties = FacultyService::get_faculties_by_university(&state.db, id).await?;
    Ok(Json(paginate_with(faculties, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}/departments",
    params(("id" = UniversityId, Path, description = "University ID"), PaginationParams),
    responses(
        (status = 200, description = "Departments of the university", body = Page<DepartmentDetails>),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn get_university_departments(
    State(state): State<AppState>,
    Path(id): Path<UniversityId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<DepartmentDetails>>, AppError> {
    UniversityService::ensure_exists(&state.db, id).await?;
    let departments = DepartmentService::get_departments_by_university(&state.db, id).await?;
    Ok(Json(paginate_with(departments, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}/classrooms",
    params(("id" = UniversityId, Path, description = "University ID"), PaginationParams),
    responses(
        (status = 200, description = "Classrooms of the university", body = Page<ClassroomDetails>),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn get_university_classrooms(
    State(state): State<AppState>,
    Path(id): Path<UniversityId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<ClassroomDetails>>, AppError> {
    UniversityService::ensure_exists(&state.db, id).await?;
    let classrooms = ClassroomService::get_classrooms_by_university(&state.db, id).await?;
    Ok(Json(paginate_with(classrooms, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}/professors",
    params(("id" = UniversityId, Path, description = "University ID"), PaginationParams),
    responses(
        (status = 200, description = "Professors of the university", body = Page<ProfessorDetails>),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn get_university_professors(
    State(state): State<AppState>,
    Path(id): Path<UniversityId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<ProfessorDetails>>, AppError> {
    UniversityService::ensure_exists(&state.db, id).await?;
    let professors = ProfessorService::get_professors_by_university(&state.db, id).await?;
    Ok(Json(paginate_with(professors, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/universities/{id}/students",
    params(("id" = UniversityId, Path, description = "University ID"), PaginationParams),
    responses(
        (status = 200, description = "Students of the university", body = Page<StudentDetails>),
        (status = 404, description = "University not found", body = ErrorResponse)
    ),
    tag = "Universities",
    security(("bearer_auth" = []))
)]
pub async fn get_university_students(
    State(state): State<AppState>,
    Path(id): Path<UniversityId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<StudentDetails>>, AppError> {
    UniversityService::ensure_exists(&state.db, id).await?;
    let students = StudentService::get_students_by_university(&state.db, id).await?;
    Ok(Json(paginate_with(students, &params)))
}
