//! Source ledger handlers.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use docindex_core::error::AppError;

use crate::dto::request::{CreateSourceRequest, UpdateSourceRequest};
use crate::dto::response::{ApiResponse, MessageResponse, SourceResponse};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/documents/{id}/sources
pub async fn list_sources(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Vec<SourceResponse>>>> {
    let sources = state.source_service.list_sources(id).await?;
    let items: Vec<SourceResponse> = sources.into_iter().map(SourceResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/documents/{id}/sources
pub async fn add_source(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateSourceRequest>,
) -> ApiResult<Json<ApiResponse<SourceResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let source = state.source_service.add_source(&user, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(SourceResponse::from(source))))
}

/// GET /api/sources/{id}
pub async fn get_source(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<SourceResponse>>> {
    let source = state.source_service.get_source(id).await?;
    Ok(Json(ApiResponse::ok(SourceResponse::from(source))))
}

/// PUT/PATCH /api/sources/{id}
pub async fn update_source(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSourceRequest>,
) -> ApiResult<Json<ApiResponse<SourceResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let source = state
        .source_service
        .update_source(&user, id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(SourceResponse::from(source))))
}

/// DELETE /api/sources/{id}
pub async fn delete_source(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.source_service.delete_source(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Source deleted".to_string(),
    })))
}
