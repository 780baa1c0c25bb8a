//! Group tree (per-user forest) repository.

use chrono::Utc;
use sqlx::SqlitePool;

use docindex_core::error::{AppError, ErrorKind};
use docindex_core::result::AppResult;
use docindex_entity::tree::GroupTree;

/// Repository for the per-user tree records.
#[derive(Debug, Clone)]
pub struct GroupTreeRepository {
    pool: SqlitePool,
}

impl GroupTreeRepository {
    /// Create a new tree repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a tree by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<GroupTree>> {
        sqlx::query_as::<_, GroupTree>("SELECT * FROM group_trees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tree by id", e))
    }

    /// Find a tree by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<GroupTree>> {
        sqlx::query_as::<_, GroupTree>("SELECT * FROM group_trees WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find tree by name", e)
            })
    }

    /// Fetch the tree named `name`, creating it if absent.
    ///
    /// Idempotent under concurrent first use: a racing insert trips the
    /// unique index and the loser re-fetches the winner's row.
    pub async fn get_or_create(&self, name: &str) -> AppResult<GroupTree> {
        if let Some(tree) = self.find_by_name(name).await? {
            return Ok(tree);
        }

        let now = Utc::now();
        let inserted = sqlx::query_as::<_, GroupTree>(
            "INSERT INTO group_trees (name, description, created_at, updated_at) \
             VALUES ($1, '', $2, $3) RETURNING *",
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(tree) => Ok(tree),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => self
                .find_by_name(name)
                .await?
                .ok_or_else(|| AppError::database("Tree vanished after unique violation")),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to create tree",
                e,
            )),
        }
    }
}
