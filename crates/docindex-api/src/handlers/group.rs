//! Group tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use docindex_core::error::AppError;
use docindex_entity::tree::GroupNode;

use crate::dto::request::{CreateGroupRequest, MoveGroupRequest, UpdateGroupRequest};
use crate::dto::response::{AnnotatedGroupResponse, ApiResponse, GroupResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/groups/parent/{id}
pub async fn list_children(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Vec<GroupResponse>>>> {
    let groups = state.tree_service.list_groups(&user, id).await?;

    let mut items = Vec::with_capacity(groups.len());
    for group in groups {
        items.push(to_response(&state, group).await?);
    }

    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/groups/parent/{id}
pub async fn create_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateGroupRequest>,
) -> ApiResult<Json<ApiResponse<GroupResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let group = state.tree_service.create_group(&user, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(to_response(&state, group).await?)))
}

/// GET /api/groups/{id}
pub async fn get_group(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<GroupResponse>>> {
    let group = state.tree_service.get_group(id).await?;
    Ok(Json(ApiResponse::ok(to_response(&state, group).await?)))
}

/// PUT/PATCH /api/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateGroupRequest>,
) -> ApiResult<Json<ApiResponse<GroupResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let group = state.tree_service.update_group(&user, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(to_response(&state, group).await?)))
}

/// PATCH /api/groups/{id}/move
pub async fn move_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<MoveGroupRequest>,
) -> ApiResult<Json<ApiResponse<GroupResponse>>> {
    let group = state
        .tree_service
        .move_group(&user, id, req.new_parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(to_response(&state, group).await?)))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.tree_service.delete_group(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Group deleted".to_string(),
    })))
}

/// GET /api/groups/annotated_list/{id}
pub async fn annotated_list(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ApiResponse<Vec<AnnotatedGroupResponse>>>> {
    let items = state.tree_service.annotated_list(&user, id).await?;
    let items: Vec<AnnotatedGroupResponse> =
        items.into_iter().map(AnnotatedGroupResponse::from).collect();
    Ok(Json(ApiResponse::ok(items)))
}

/// Resolve the parent id and child count for one node.
async fn to_response(state: &AppState, group: GroupNode) -> Result<GroupResponse, AppError> {
    let parent = state.tree_service.parent_id(&group).await?;
    let numchild = state.tree_service.children_count(&group).await?;
    Ok(GroupResponse::from_parts(group, parent, numchild))
}
