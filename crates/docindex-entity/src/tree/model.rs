//! Group tree and group node entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::tree::path;

/// An isolated forest of group nodes scoped to one owning identity.
///
/// Named after the owning username and created lazily the first time that
/// user inserts a root group. Never deleted by the service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupTree {
    /// Unique tree identifier.
    pub id: i64,
    /// Unique tree name (the owning username).
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// When the tree was created.
    pub created_at: DateTime<Utc>,
    /// When the tree was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A node in a materialized-path group tree.
///
/// `path` is a string of fixed-width base-36 segments encoding the full
/// ancestry: a node's parent is the node whose path is this path with the
/// final segment removed. Sibling path order always matches name order, so
/// a `(tree_id, path)` range scan yields the name-ordered depth-first
/// traversal directly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupNode {
    /// Unique node identifier.
    pub id: i64,
    /// The tree (per-user forest) this node belongs to.
    pub tree_id: i64,
    /// The user who created the node.
    pub owner_id: i64,
    /// Group name. Determines sibling order.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Free-form comment.
    pub comment: String,
    /// Materialized path.
    pub path: String,
    /// Depth in the tree (roots at 1). Always `path.len() / STEPLEN`.
    pub depth: i64,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
}

impl GroupNode {
    /// Check if this is a root node (single-segment path).
    pub fn is_root(&self) -> bool {
        path::is_root(&self.path)
    }

    /// Check if this node is a strict ancestor of `other`.
    pub fn is_ancestor_of(&self, other: &GroupNode) -> bool {
        self.tree_id == other.tree_id && path::is_ancestor(&self.path, &other.path)
    }
}

/// Field values for creating a new group node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroupNode {
    /// Group name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

/// Partial update of a group node.
///
/// Each field is present-or-absent; absent fields are left untouched. A
/// name change repositions the node among its siblings since sibling order
/// is name-derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupNode {
    /// New group name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New comment.
    pub comment: Option<String>,
}

impl UpdateGroupNode {
    /// Whether the update carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.comment.is_none()
    }
}
