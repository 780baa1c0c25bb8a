//! Document ledger handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use docindex_core::error::AppError;
use docindex_entity::document::Document;

use crate::dto::request::{CreateDocumentRequest, DocumentListQuery, UpdateDocumentRequest};
use crate::dto::response::{ApiResponse, DocumentResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/documents?group_id=...
pub async fn list_documents(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<DocumentListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<DocumentResponse>>>> {
    let documents = state.document_service.list_documents(query.group_id).await?;

    let mut items = Vec::with_capacity(documents.len());
    for document in documents {
        items.push(with_sources(&state, document).await?);
    }

    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/documents
pub async fn create_document(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateDocumentRequest>,
) -> ApiResult<Json<ApiResponse<DocumentResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let document = state
        .document_service
        .create_document(&user, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(DocumentResponse::from_parts(
        document,
        Vec::new(),
    ))))
}

/// GET /api/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<DocumentResponse>>> {
    let document = state.document_service.get_document(id).await?;
    Ok(Json(ApiResponse::ok(with_sources(&state, document).await?)))
}

/// PUT/PATCH /api/documents/{id}
pub async fn update_document(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDocumentRequest>,
) -> ApiResult<Json<ApiResponse<DocumentResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let document = state
        .document_service
        .update_document(&user, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(with_sources(&state, document).await?)))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.document_service.delete_document(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Document deleted".to_string(),
    })))
}

/// Attach the document's source rows, in sequence order.
async fn with_sources(state: &AppState, document: Document) -> Result<DocumentResponse, AppError> {
    let sources = state.source_service.list_sources(document.id).await?;
    Ok(DocumentResponse::from_parts(document, sources))
}
