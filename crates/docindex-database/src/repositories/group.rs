//! Group node repository: materialized-path tree storage.
//!
//! Sibling path order always matches name order, so every structural
//! write goes through slot planning: find the name-sorted slot under the
//! parent, shift the sibling subtrees that come after it one segment up,
//! and place the node in the freed slot. Moves and renames rewrite the
//! whole subtree's paths in the same transaction, so a failure rolls the
//! tree back to its pre-operation state.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};

use docindex_core::error::{AppError, ErrorKind};
use docindex_core::result::AppResult;
use docindex_entity::tree::path;
use docindex_entity::tree::{CreateGroupNode, GroupNode, UpdateGroupNode};

/// A planned insertion slot under a parent.
struct SlotPlan {
    /// The path the node will occupy.
    path: String,
    /// Sibling paths that must shift one segment up to free the slot,
    /// ordered last-first so each shift lands on a vacant slot.
    shifts: Vec<String>,
}

/// Repository for group node CRUD and tree-structural mutations.
#[derive(Debug, Clone)]
pub struct GroupNodeRepository {
    pool: SqlitePool,
}

impl GroupNodeRepository {
    /// Create a new group node repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a node by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<GroupNode>> {
        sqlx::query_as::<_, GroupNode>("SELECT * FROM group_nodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    /// Find a node by its path within a tree.
    pub async fn find_by_path(&self, tree_id: i64, node_path: &str) -> AppResult<Option<GroupNode>> {
        sqlx::query_as::<_, GroupNode>(
            "SELECT * FROM group_nodes WHERE tree_id = $1 AND path = $2",
        )
        .bind(tree_id)
        .bind(node_path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group by path", e))
    }

    /// List root nodes of a tree, in name order.
    pub async fn find_roots(&self, tree_id: i64) -> AppResult<Vec<GroupNode>> {
        sqlx::query_as::<_, GroupNode>(
            "SELECT * FROM group_nodes WHERE tree_id = $1 AND depth = 1 ORDER BY path",
        )
        .bind(tree_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list root groups", e))
    }

    /// List direct children of a node, in name order.
    pub async fn find_children(&self, parent: &GroupNode) -> AppResult<Vec<GroupNode>> {
        sqlx::query_as::<_, GroupNode>(
            "SELECT * FROM group_nodes \
             WHERE tree_id = $1 AND depth = $2 AND path LIKE $3 ORDER BY path",
        )
        .bind(parent.tree_id)
        .bind(parent.depth + 1)
        .bind(format!("{}%", parent.path))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list children", e))
    }

    /// Count direct children of a node.
    pub async fn count_children(&self, node: &GroupNode) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM group_nodes \
             WHERE tree_id = $1 AND depth = $2 AND path LIKE $3",
        )
        .bind(node.tree_id)
        .bind(node.depth + 1)
        .bind(format!("{}%", node.path))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count children", e))
    }

    /// Count documents attached to a node.
    pub async fn count_documents(&self, group_id: i64) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count documents", e))
    }

    /// The subtree rooted at `node` (inclusive), in depth-first order.
    pub async fn subtree(&self, node: &GroupNode) -> AppResult<Vec<GroupNode>> {
        sqlx::query_as::<_, GroupNode>(
            "SELECT * FROM group_nodes WHERE tree_id = $1 AND path LIKE $2 ORDER BY path",
        )
        .bind(node.tree_id)
        .bind(format!("{}%", node.path))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load subtree", e))
    }

    /// Every node of a tree, in depth-first order.
    pub async fn tree_nodes(&self, tree_id: i64) -> AppResult<Vec<GroupNode>> {
        sqlx::query_as::<_, GroupNode>(
            "SELECT * FROM group_nodes WHERE tree_id = $1 ORDER BY path",
        )
        .bind(tree_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tree", e))
    }

    /// Insert a node at its name-sorted slot under `parent_id` (or at
    /// root level when `None`).
    ///
    /// The parent row is re-read inside the transaction so the slot is
    /// planned against its committed path, not a caller snapshot.
    pub async fn insert(
        &self,
        tree_id: i64,
        owner_id: i64,
        parent_id: Option<i64>,
        data: &CreateGroupNode,
    ) -> AppResult<GroupNode> {
        let mut tx = self.begin().await?;

        let parent_path = match parent_id {
            None => String::new(),
            Some(id) => self.require_in_tx(&mut tx, id).await?.path,
        };

        let plan = plan_slot(&mut tx, tree_id, &parent_path, &data.name, None).await?;
        apply_shifts(&mut tx, tree_id, &plan).await?;

        let now = Utc::now();
        let node = sqlx::query_as::<_, GroupNode>(
            "INSERT INTO group_nodes \
             (tree_id, owner_id, name, description, comment, path, depth, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(tree_id)
        .bind(owner_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.comment)
        .bind(&plan.path)
        .bind(path::depth_of(&plan.path))
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert group", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit insert", e))?;

        Ok(node)
    }

    /// Apply a partial field update. A name change repositions the node
    /// (and its subtree) among its siblings.
    ///
    /// The row is re-read inside the transaction; fallback values and the
    /// relocation come from its committed state.
    pub async fn update_fields(
        &self,
        node_id: i64,
        update: &UpdateGroupNode,
    ) -> AppResult<GroupNode> {
        let mut tx = self.begin().await?;

        let node = self.require_in_tx(&mut tx, node_id).await?;
        let new_name = update.name.clone().unwrap_or_else(|| node.name.clone());
        let new_description = update
            .description
            .clone()
            .unwrap_or_else(|| node.description.clone());
        let new_comment = update.comment.clone().unwrap_or_else(|| node.comment.clone());
        let name_changed = new_name != node.name;

        sqlx::query(
            "UPDATE group_nodes SET name = $1, description = $2, comment = $3, updated_at = $4 \
             WHERE id = $5",
        )
        .bind(&new_name)
        .bind(&new_description)
        .bind(&new_comment)
        .bind(Utc::now())
        .bind(node.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update group", e))?;

        if name_changed {
            let parent_path = path::parent_path(&node.path).unwrap_or("").to_string();
            relocate(&mut tx, node.tree_id, &node.path, &parent_path, &new_name).await?;
        }

        let refreshed = self.require_in_tx(&mut tx, node.id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit update", e))?;

        Ok(refreshed)
    }

    /// Re-parent the node under `new_parent_id` (root level when `None`),
    /// placing it at its name-sorted slot and rewriting the path and
    /// depth of every descendant.
    ///
    /// Both rows are re-read and the structural guards (self-move, cycle,
    /// cross-tree) re-checked inside the transaction, so a move committed
    /// in between cannot leave this one rewriting a path that no longer
    /// exists.
    pub async fn move_node(
        &self,
        node_id: i64,
        new_parent_id: Option<i64>,
    ) -> AppResult<GroupNode> {
        let mut tx = self.begin().await?;

        let node = self.require_in_tx(&mut tx, node_id).await?;
        let new_parent_path = match new_parent_id {
            None => String::new(),
            Some(parent_id) => {
                let parent = self.require_in_tx(&mut tx, parent_id).await?;
                if parent.id == node.id {
                    return Err(AppError::invalid_operation(
                        "Cannot move a group into itself",
                    ));
                }
                if parent.tree_id != node.tree_id {
                    return Err(AppError::invalid_operation(
                        "Cannot move a group into another user's tree",
                    ));
                }
                if node.is_ancestor_of(&parent) {
                    return Err(AppError::invalid_operation(
                        "Cannot move a group into one of its descendants",
                    ));
                }
                parent.path
            }
        };

        relocate(&mut tx, node.tree_id, &node.path, &new_parent_path, &node.name).await?;

        sqlx::query("UPDATE group_nodes SET updated_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(node.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch group", e))?;

        let refreshed = self.require_in_tx(&mut tx, node.id).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit move", e))?;

        Ok(refreshed)
    }

    /// Delete a node, refusing while it has children or attached
    /// documents. The row is re-read inside the transaction so the
    /// guards count against its committed path, and guards and delete
    /// share that transaction.
    pub async fn delete(&self, node_id: i64) -> AppResult<()> {
        let mut tx = self.begin().await?;

        let node = self.require_in_tx(&mut tx, node_id).await?;

        let children: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM group_nodes \
             WHERE tree_id = $1 AND depth = $2 AND path LIKE $3",
        )
        .bind(node.tree_id)
        .bind(node.depth + 1)
        .bind(format!("{}%", node.path))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count children", e))?;

        if children > 0 {
            return Err(AppError::conflict(format!(
                "Group {} has {children} child group(s)",
                node.id
            )));
        }

        let documents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE group_id = $1")
                .bind(node.id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
                })?;

        if documents > 0 {
            return Err(AppError::conflict(format!(
                "Group {} has {documents} attached document(s)",
                node.id
            )));
        }

        sqlx::query("DELETE FROM group_nodes WHERE id = $1")
            .bind(node.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit delete", e))?;

        Ok(())
    }

    async fn begin(&self) -> AppResult<Transaction<'_, Sqlite>> {
        self.pool
            .begin()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to open transaction", e))
    }

    /// The committed row for `id`, read through the open transaction.
    async fn require_in_tx(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> AppResult<GroupNode> {
        sqlx::query_as::<_, GroupNode>("SELECT * FROM group_nodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load group", e))?
            .ok_or_else(|| AppError::not_found(format!("Group {id} not found")))
    }
}

/// Plan the name-sorted slot for `name` under `parent_path`.
///
/// `exclude_path` removes one sibling (the node being relocated) from
/// consideration. Ties on name sort after existing siblings, so order is
/// stable under re-insertion.
async fn plan_slot(
    tx: &mut Transaction<'_, Sqlite>,
    tree_id: i64,
    parent_path: &str,
    name: &str,
    exclude_path: Option<&str>,
) -> AppResult<SlotPlan> {
    let siblings = sibling_rows(tx, tree_id, parent_path, exclude_path).await?;

    match siblings.iter().position(|(sib_name, _)| sib_name.as_str() > name) {
        None => {
            let slot = match siblings.last() {
                Some((_, last_path)) => path::next_sibling(last_path)?,
                None => path::first_child(parent_path)?,
            };
            Ok(SlotPlan {
                path: slot,
                shifts: Vec::new(),
            })
        }
        Some(idx) => Ok(SlotPlan {
            path: siblings[idx].1.clone(),
            shifts: siblings[idx..]
                .iter()
                .rev()
                .map(|(_, sib_path)| sib_path.clone())
                .collect(),
        }),
    }
}

/// Shift each planned sibling subtree one segment up, last-first.
async fn apply_shifts(
    tx: &mut Transaction<'_, Sqlite>,
    tree_id: i64,
    plan: &SlotPlan,
) -> AppResult<()> {
    for sib_path in &plan.shifts {
        let target = path::next_sibling(sib_path)?;
        rewrite_subtree(tx, tree_id, sib_path, &target, 0).await?;
    }
    Ok(())
}

/// Move the subtree at `old_path` to its name-sorted slot under
/// `new_parent_path`, shifting siblings as needed.
///
/// When the slot plan requires shifting, the subtree is first parked two
/// slots past the last sibling so a shifted sibling can never land on the
/// subtree's current path.
async fn relocate(
    tx: &mut Transaction<'_, Sqlite>,
    tree_id: i64,
    old_path: &str,
    new_parent_path: &str,
    name: &str,
) -> AppResult<()> {
    let mut current = old_path.to_string();

    let plan = plan_slot(tx, tree_id, new_parent_path, name, Some(&current)).await?;
    let plan = if plan.shifts.is_empty() {
        plan
    } else {
        let parking = parking_slot(tx, tree_id, new_parent_path, &current).await?;
        let delta = path::depth_of(&parking) - path::depth_of(&current);
        rewrite_subtree(tx, tree_id, &current, &parking, delta).await?;
        current = parking;
        plan_slot(tx, tree_id, new_parent_path, name, Some(&current)).await?
    };

    apply_shifts(tx, tree_id, &plan).await?;

    if plan.path != current {
        let delta = path::depth_of(&plan.path) - path::depth_of(&current);
        rewrite_subtree(tx, tree_id, &current, &plan.path, delta).await?;
    }

    Ok(())
}

/// A guaranteed-free slot two segments past the last sibling under
/// `new_parent_path` (shifts only ever advance siblings by one).
async fn parking_slot(
    tx: &mut Transaction<'_, Sqlite>,
    tree_id: i64,
    parent_path: &str,
    exclude_path: &str,
) -> AppResult<String> {
    let siblings = sibling_rows(tx, tree_id, parent_path, Some(exclude_path)).await?;
    let last_value = match siblings.last() {
        Some((_, last_path)) => path::decode_segment(path::last_segment(last_path))?,
        None => 0,
    };
    Ok(format!(
        "{parent_path}{}",
        path::encode_segment(last_value + 2)?
    ))
}

/// Direct children of `parent_path` as `(name, path)` rows in path order
/// (equal to name order by invariant).
async fn sibling_rows(
    tx: &mut Transaction<'_, Sqlite>,
    tree_id: i64,
    parent_path: &str,
    exclude_path: Option<&str>,
) -> AppResult<Vec<(String, String)>> {
    let depth = path::depth_of(parent_path) + 1;
    let rows = match exclude_path {
        Some(excluded) => {
            sqlx::query_as::<_, (String, String)>(
                "SELECT name, path FROM group_nodes \
                 WHERE tree_id = $1 AND depth = $2 AND path LIKE $3 AND path <> $4 \
                 ORDER BY path",
            )
            .bind(tree_id)
            .bind(depth)
            .bind(format!("{parent_path}%"))
            .bind(excluded)
            .fetch_all(&mut **tx)
            .await
        }
        None => {
            sqlx::query_as::<_, (String, String)>(
                "SELECT name, path FROM group_nodes \
                 WHERE tree_id = $1 AND depth = $2 AND path LIKE $3 ORDER BY path",
            )
            .bind(tree_id)
            .bind(depth)
            .bind(format!("{parent_path}%"))
            .fetch_all(&mut **tx)
            .await
        }
    };
    rows.map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list siblings", e))
}

/// Rewrite every path in the subtree at `old_prefix` to sit under
/// `new_prefix`, adjusting depth by `depth_delta`.
async fn rewrite_subtree(
    tx: &mut Transaction<'_, Sqlite>,
    tree_id: i64,
    old_prefix: &str,
    new_prefix: &str,
    depth_delta: i64,
) -> AppResult<()> {
    sqlx::query(
        "UPDATE group_nodes \
         SET path = $1 || substr(path, $2), depth = depth + $3 \
         WHERE tree_id = $4 AND path LIKE $5",
    )
    .bind(new_prefix)
    .bind((old_prefix.len() + 1) as i64)
    .bind(depth_delta)
    .bind(tree_id)
    .bind(format!("{old_prefix}%"))
    .execute(&mut **tx)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rewrite subtree paths", e))?;
    Ok(())
}
