use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    classrooms::ClassroomDetails,
    departments::{CreateDepartmentDto, CreatedDepartment, DepartmentDetails, UpdateDepartmentDto},
    ids::DepartmentId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::records::{StatusTable, change_status};
use crate::validator::{Pagination, ValidatedJson};

use crate::modules::classrooms::service::ClassroomService;

use super::service::DepartmentService;

#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = CreateDepartmentDto,
    responses(
        (status = 201, description = "Department created", body = CreatedDepartment),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse),
        (status = 422, description = "Validation failed or unknown faculty", body = ErrorResponse)
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn create_department(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateDepartmentDto>,
) -> Result<(StatusCode, Json<CreatedDepartment>), AppError> {
    let department = DepartmentService::create_department(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedDepartment {
            message: "Department created successfully".to_string(),
            department,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/departments/{id}",
    params(("id" = DepartmentId, Path, description = "Department ID")),
    request_body = UpdateDepartmentDto,
    responses(
        (status = 200, description = "Department updated", body = MutationResponse),
        (status = 404, description = "Department not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn update_department(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<DepartmentId>,
    ValidatedJson(dto): ValidatedJson<UpdateDepartmentDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let department = DepartmentService::update_department(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Department updated successfully",
        department.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/departments",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated departments", body = Page<DepartmentDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn get_departments(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<DepartmentDetails>>, AppError> {
    let departments = DepartmentService::get_departments(&state.db).await?;
    Ok(Json(paginate_with(departments, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}",
    params(("id" = DepartmentId, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department details", body = DepartmentDetails),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<DepartmentId>,
) -> Result<Json<DepartmentDetails>, AppError> {
    let department = DepartmentService::get_department(&state.db, id).await?;
    Ok(Json(department))
}

#[utoipa::path(
    patch,
    path = "/api/v1/departments/{id}/activate",
    params(("id" = DepartmentId, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department activated", body = MutationResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn activate_department(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<DepartmentId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Departments,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/departments/{id}/deactivate",
    params(("id" = DepartmentId, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department deactivated", body = MutationResponse),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_department(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<DepartmentId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Departments,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}/classrooms",
    params(("id" = DepartmentId, Path, description = "Department ID"), PaginationParams),
    responses(
        (status = 200, description = "Classrooms of the department", body = Page<ClassroomDetails>),
        (status = 404, description = "Department not found", body = ErrorResponse)
    ),
    tag = "Departments",
    security(("bearer_auth" = []))
)]
pub async fn get_department_classrooms(
    State(state): State<AppState>,
    Path(id): Path<DepartmentId>,
    Pagination(params): Pagination,
) -> Result<Json<Page<ClassroomDetails>>, AppError> {
    DepartmentService::ensure_exists(&state.db, id).await?;
    let classrooms = ClassroomService::get_classrooms_by_department(&state.db, id).await?;
    Ok(Json(paginate_with(classrooms, &params)))
}
