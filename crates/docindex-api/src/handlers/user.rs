//! User attribution handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.user_service.list_users().await?;
    let items: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
