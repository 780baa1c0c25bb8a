//! Group tree operations: scope resolution, CRUD, move, annotated list.

use std::sync::Arc;

use tracing::info;

use docindex_core::error::AppError;
use docindex_core::result::AppResult;
use docindex_database::repositories::group::GroupNodeRepository;
use docindex_database::repositories::tree::GroupTreeRepository;
use docindex_entity::tree::{
    AnnotatedNode, CreateGroupNode, GroupNode, GroupTree, UpdateGroupNode, annotate, path,
};

use crate::context::RequestContext;

/// The parent id meaning "root level of the caller's tree".
pub const ROOT_PARENT: i64 = 0;

/// Manages the per-user group forests.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Tree (per-user forest) repository.
    tree_repo: Arc<GroupTreeRepository>,
    /// Group node repository.
    group_repo: Arc<GroupNodeRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(tree_repo: Arc<GroupTreeRepository>, group_repo: Arc<GroupNodeRepository>) -> Self {
        Self {
            tree_repo,
            group_repo,
        }
    }

    /// Resolve the caller's tree, creating it on first use.
    pub async fn resolve_or_create_tree(&self, ctx: &RequestContext) -> AppResult<GroupTree> {
        self.tree_repo.get_or_create(&ctx.username).await
    }

    /// Gets a group by ID.
    pub async fn get_group(&self, group_id: i64) -> AppResult<GroupNode> {
        self.group_repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Group {group_id} not found")))
    }

    /// Lists groups under a parent; `parent_id` 0 lists the root level of
    /// the caller's tree. Ordered by name.
    pub async fn list_groups(
        &self,
        ctx: &RequestContext,
        parent_id: i64,
    ) -> AppResult<Vec<GroupNode>> {
        if parent_id == ROOT_PARENT {
            // No tree yet means the caller simply has no groups.
            return match self.tree_repo.find_by_name(&ctx.username).await? {
                Some(tree) => self.group_repo.find_roots(tree.id).await,
                None => Ok(Vec::new()),
            };
        }

        let parent = self.get_group(parent_id).await?;
        self.group_repo.find_children(&parent).await
    }

    /// Number of direct children below a group.
    pub async fn children_count(&self, group: &GroupNode) -> AppResult<i64> {
        self.group_repo.count_children(group).await
    }

    /// The parent id of a group, 0 for roots.
    pub async fn parent_id(&self, group: &GroupNode) -> AppResult<i64> {
        match path::parent_path(&group.path) {
            None => Ok(ROOT_PARENT),
            Some(parent_path) => self
                .group_repo
                .find_by_path(group.tree_id, parent_path)
                .await?
                .map(|p| p.id)
                .ok_or_else(|| {
                    AppError::internal(format!("Group {} has a dangling parent path", group.id))
                }),
        }
    }

    /// Creates a group under `parent_id` (0 = new root in the caller's
    /// tree, created lazily on first use).
    pub async fn create_group(
        &self,
        ctx: &RequestContext,
        parent_id: i64,
        data: CreateGroupNode,
    ) -> AppResult<GroupNode> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Group name cannot be empty"));
        }

        let group = if parent_id == ROOT_PARENT {
            let tree = self.resolve_or_create_tree(ctx).await?;
            self.group_repo
                .insert(tree.id, ctx.user_id, None, &data)
                .await?
        } else {
            let parent = self.get_group(parent_id).await?;
            self.group_repo
                .insert(parent.tree_id, ctx.user_id, Some(parent.id), &data)
                .await?
        };

        info!(
            user_id = ctx.user_id,
            group_id = group.id,
            parent_id,
            name = %group.name,
            "Group created"
        );

        Ok(group)
    }

    /// Partially updates a group's name/description/comment. A name
    /// change re-sorts the group among its siblings.
    pub async fn update_group(
        &self,
        ctx: &RequestContext,
        group_id: i64,
        update: UpdateGroupNode,
    ) -> AppResult<GroupNode> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Group name cannot be empty"));
            }
        }

        let group = self.get_group(group_id).await?;
        if update.is_empty() {
            return Ok(group);
        }

        let updated = self.group_repo.update_fields(group.id, &update).await?;

        info!(user_id = ctx.user_id, group_id, "Group updated");
        Ok(updated)
    }

    /// Moves a group under a new parent (0 = root level), re-sorting it
    /// among the new siblings and rewriting the subtree's ancestry.
    ///
    /// The repository re-checks the structural guards against the
    /// committed rows inside its transaction; the checks here reject
    /// obviously invalid requests before a transaction is opened.
    pub async fn move_group(
        &self,
        ctx: &RequestContext,
        group_id: i64,
        new_parent_id: i64,
    ) -> AppResult<GroupNode> {
        let group = self.get_group(group_id).await?;

        let new_parent = if new_parent_id == ROOT_PARENT {
            None
        } else {
            let parent = self.get_group(new_parent_id).await?;
            if parent.id == group.id {
                return Err(AppError::invalid_operation(
                    "Cannot move a group into itself",
                ));
            }
            if parent.tree_id != group.tree_id {
                return Err(AppError::invalid_operation(
                    "Cannot move a group into another user's tree",
                ));
            }
            if group.is_ancestor_of(&parent) {
                return Err(AppError::invalid_operation(
                    "Cannot move a group into one of its descendants",
                ));
            }
            Some(parent)
        };

        let moved = self
            .group_repo
            .move_node(group.id, new_parent.map(|p| p.id))
            .await?;

        info!(
            user_id = ctx.user_id,
            group_id,
            new_parent_id,
            "Group moved"
        );

        Ok(moved)
    }

    /// Deletes a group. Refused while it has children or documents.
    pub async fn delete_group(&self, ctx: &RequestContext, group_id: i64) -> AppResult<()> {
        let group = self.get_group(group_id).await?;
        self.group_repo.delete(group.id).await?;

        info!(user_id = ctx.user_id, group_id, "Group deleted");
        Ok(())
    }

    /// Depth-first annotated listing. `group_id` 0 lists the caller's
    /// whole forest; otherwise the subtree rooted at the group.
    pub async fn annotated_list(
        &self,
        ctx: &RequestContext,
        group_id: i64,
    ) -> AppResult<Vec<AnnotatedNode>> {
        let nodes = if group_id == ROOT_PARENT {
            match self.tree_repo.find_by_name(&ctx.username).await? {
                Some(tree) => self.group_repo.tree_nodes(tree.id).await?,
                None => Vec::new(),
            }
        } else {
            let root = self.get_group(group_id).await?;
            self.group_repo.subtree(&root).await?
        };

        Ok(annotate(nodes))
    }
}
