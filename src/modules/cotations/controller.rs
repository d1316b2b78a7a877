use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    MutationResponse,
    cotations::{CotationDetails, CreateCotationDto, CreatedCotation, UpdateCotationDto},
    ids::CotationId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::validator::{Pagination, ValidatedJson};

use super::service::CotationService;

#[utoipa::path(
    post,
    path = "/api/v1/cotations",
    request_body = CreateCotationDto,
    responses(
        (status = 201, description = "Cotation created", body = CreatedCotation),
        (status = 400, description = "Student already graded in this course", body = ErrorResponse),
        (status = 403, description = "Caller is not a professor", body = ErrorResponse),
        (status = 422, description = "Validation failed or unknown reference", body = ErrorResponse)
    ),
    tag = "Cotations",
    security(("bearer_auth" = []))
)]
pub async fn create_cotation(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCotationDto>,
) -> Result<(StatusCode, Json<CreatedCotation>), AppError> {
    let cotation = CotationService::create_cotation(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedCotation {
            message: "Cotation created successfully".to_string(),
            cotation,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/cotations/{id}",
    params(("id" = CotationId, Path, description = "Cotation ID")),
    request_body = UpdateCotationDto,
    responses(
        (status = 200, description = "Cotation updated", body = MutationResponse),
        (status = 404, description = "Cotation not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Cotations",
    security(("bearer_auth" = []))
)]
pub async fn update_cotation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CotationId>,
    ValidatedJson(dto): ValidatedJson<UpdateCotationDto>,
) -> Result<Json<MutationResponse>, AppError> {
    let cotation = CotationService::update_cotation(&state.db, id, dto).await?;
    Ok(Json(MutationResponse::new(
        "Cotation updated successfully",
        cotation.id,
        current_user.account_type,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/cotations",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated cotations", body = Page<CotationDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Cotations",
    security(("bearer_auth" = []))
)]
pub async fn get_cotations(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<CotationDetails>>, AppError> {
    let cotations = CotationService::get_cotations(&state.db).await?;
    Ok(Json(paginate_with(cotations, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/cotations/{id}",
    params(("id" = CotationId, Path, description = "Cotation ID")),
    responses(
        (status = 200, description = "Cotation details", body = CotationDetails),
        (status = 404, description = "Cotation not found", body = ErrorResponse)
    ),
    tag = "Cotations",
    security(("bearer_auth" = []))
)]
pub async fn get_cotation(
    State(state): State<AppState>,
    Path(id): Path<CotationId>,
) -> Result<Json<CotationDetails>, AppError> {
    let cotation = CotationService::get_cotation(&state.db, id).await?;
    Ok(Json(cotation))
}
