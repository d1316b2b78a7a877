use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse, RecordStatus,
    academic_years::{
        AcademicYearDetails, CreateAcademicYearDto, CreatedAcademicYear, UpdateAcademicYearDto,
    },
    ids::AcademicYearId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::records::{StatusTable, change_status};
use crate::validator::{Pagination, ValidatedJson};

use super::service::AcademicYearService;

#[utoipa::path(
    post,
    path = "/api/v1/academic-years",
    request_body = CreateAcademicYearDto,
    responses(
        (status = 201, description = "Academic year created as the active year", body = CreatedAcademicYear),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse),
        (status = 422, description = "Validation failed or unknown university", body = ErrorResponse)
    ),
    tag = "Academic years",
    security(("bearer_auth" = []))
)]
pub async fn create_academic_year(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAcademicYearDto>,
) -> Result<(StatusCode, Json<CreatedAcademicYear>), AppError> {
    let academic_year = AcademicYearService::create_academic_year(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedAcademicYear {
            message: "Academic year created successfully".to_string(),
            academic_year,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/academic-years/{id}",
    params(("id" = AcademicYearId, Path, description = "Academic year ID")),
    request_body = UpdateAcademicYearDto,
    responses(
        (status = 200, description = "Academic year updated", body = MutationResponse),
        (status = 404, description = "Academic year not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Academic years",
    security(("bearer_auth" = []))
)]
pub async fn update_academic_year(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<AcademicYearId>,
    ValidatedJson(dto): ValidatedJson<UpdateAcademicYearDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let academic_year = AcademicYearService::update_academic_year(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Academic year updated successfully",
        academic_year.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/academic-years",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated academic years", body = Page<AcademicYearDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Academic years",
    security(("bearer_auth" = []))
)]
pub async fn get_academic_years(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<AcademicYearDetails>>, AppError> {
    let years = AcademicYearService::get_academic_years(&state.db).await?;
    Ok(Json(paginate_with(years, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/academic-years/{id}",
    params(("id" = AcademicYearId, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Academic year details", body = AcademicYearDetails),
        (status = 404, description = "Academic year not found", body = ErrorResponse)
    ),
    tag = "Academic years",
    security(("bearer_auth" = []))
)]
pub async fn get_academic_year(
    State(state): State<AppState>,
    Path(id): Path<AcademicYearId>,
) -> Result<Json<AcademicYearDetails>, AppError> {
    let academic_year = AcademicYearService::get_academic_year(&state.db, id).await?;
    Ok(Json(academic_year))
}

#[utoipa::path(
    patch,
    path = "/api/v1/academic-years/{id}/activate",
    params(("id" = AcademicYearId, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Academic year activated, others of the university deactivated", body = MutationResponse),
        (status = 404, description = "Academic year not found", body = ErrorResponse)
    ),
    tag = "Academic years",
    security(("bearer_auth" = []))
)]
pub async fn activate_academic_year(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<AcademicYearId>,
) -> Result<Json<MutationResponse>, AppError> {
    let academic_year = AcademicYearService::activate_academic_year(&state.db, id).await?;
    Ok(Json(MutationResponse::status_changed(
        StatusTable::AcademicYears.entity(),
        academic_year.id,
        RecordStatus::Active,
        current_user.account_type,
    )))
}

#[utoipa::path(
    patch,
    path = "/api/v1/academic-years/{id}/deactivate",
    params(("id" = AcademicYearId, Path, description = "Academic year ID")),
    responses(
        (status = 200, description = "Academic year deactivated", body = MutationResponse),
        (status = 404, description = "Academic year not found", body = ErrorResponse)
    ),
    tag = "Academic years",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_academic_year(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<AcademicYearId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::AcademicYears,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}
