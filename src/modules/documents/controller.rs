use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use tracing::warn;
use unidocs_core::{AppError, Page, PaginationParams, errors::ErrorResponse, paginate_with};
use unidocs_models::{
    DocumentType, MutationResponse, RecordStatus,
    documents::{CreatedDocument, DocumentDetails, DocumentForm, DocumentMultipart},
    ids::DocumentId,
};

use crate::middleware::auth::CurrentUser;
use crate::state::AppState;
use crate::utils::multipart::MultipartForm;
use crate::utils::records::{StatusTable, change_status};
use crate::utils::uploads::{StoredFile, remove_files, store_files};
use crate::validator::Pagination;

use super::service::{DocumentContent, DocumentService};

const IMAGE_FIELD: &str = "image";

/// Creates an `Image` document from the uploaded files or a
/// `Releve de cotes` generated from the student's cotations.
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    request_body(content = DocumentMultipart, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Document created", body = CreatedDocument),
        (status = 400, description = "Malformed form or unknown documentType", body = ErrorResponse),
        (status = 403, description = "Caller is not an owner", body = ErrorResponse),
        (status = 413, description = "A file is too large", body = ErrorResponse),
        (status = 422, description = "Transcript data missing or validation failed", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("bearer_auth" = []))
)]
pub async fn create_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedDocument>), AppError> {
    let form = MultipartForm::read(multipart, state.storage_config.max_file_bytes).await?;
    let fields: DocumentForm = form.parse()?;
    let document_type: DocumentType = fields
        .document_type
        .parse()
        .map_err(|e: String| AppError::bad_request(anyhow::anyhow!(e)))?;

    let mut stored: Vec<StoredFile> = Vec::new();
    let content = match document_type {
        DocumentType::Image => {
            let files = form.files_in(IMAGE_FIELD, state.storage_config.max_files)?;
            stored = store_files(state.storage.as_ref(), "documents", &files).await?;
            DocumentContent::Images(stored.iter().map(|f| f.url.clone()).collect())
        }
        DocumentType::ReleveDeCotes => DocumentContent::Releve(
            DocumentService::build_releve(&state.db, fields.user_id, fields.university_id).await?,
        ),
    };

    match DocumentService::create_document(&state.db, &fields, content).await {
        Ok(document) => Ok((
            StatusCode::CREATED,
            Json(CreatedDocument {
                message: "Document created successfully".to_string(),
                document,
            }),
        )),
        Err(e) => {
            if !stored.is_empty() {
                warn!(count = stored.len(), "Removing uploads of a document that was not saved");
                remove_files(state.storage.as_ref(), &stored).await;
            }
            Err(e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/documents",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated documents", body = Page<DocumentDetails>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("bearer_auth" = []))
)]
pub async fn get_documents(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Json<Page<DocumentDetails>>, AppError> {
    let documents = DocumentService::get_documents(&state.db).await?;
    Ok(Json(paginate_with(documents, &params)))
}

#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}",
    params(("id" = DocumentId, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document details", body = DocumentDetails),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("bearer_auth" = []))
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<DocumentId>,
) -> Result<Json<DocumentDetails>, AppError> {
    let document = DocumentService::get_document(&state.db, id).await?;
    Ok(Json(document))
}

#[utoipa::path(
    patch,
    path = "/api/v1/documents/{id}/activate",
    params(("id" = DocumentId, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document activated", body = MutationResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("bearer_auth" = []))
)]
pub async fn activate_document(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<DocumentId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Documents,
        id,
        RecordStatus::Active,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    patch,
    path = "/api/v1/documents/{id}/deactivate",
    params(("id" = DocumentId, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deactivated", body = MutationResponse),
        (status = 404, description = "Document not found", body = ErrorResponse)
    ),
    tag = "Documents",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_document(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<DocumentId>,
) -> Result<Json<MutationResponse>, AppError> {
    let response = change_status(
        &state.db,
        StatusTable::Documents,
        id,
        RecordStatus::Inactive,
        current_user.account_type,
    )
    .await?;
    Ok(Json(response))
}
