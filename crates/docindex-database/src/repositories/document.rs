//! Document repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use docindex_core::error::{AppError, ErrorKind};
use docindex_core::result::AppResult;
use docindex_entity::document::{CreateDocument, Document, UpdateDocument};

/// Repository for document CRUD.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a document by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    /// List all documents, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    /// List documents owned by a group, newest first.
    pub async fn find_by_group(&self, group_id: i64) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE group_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list documents by group", e)
        })
    }

    /// Create a new document.
    pub async fn create(&self, data: &CreateDocument) -> AppResult<Document> {
        let now = Utc::now();
        sqlx::query_as::<_, Document>(
            "INSERT INTO documents \
             (group_id, name, description, comment, source_count, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, 0, $5, $6) RETURNING *",
        )
        .bind(data.group_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.comment)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    /// Apply a partial field update.
    pub async fn update_fields(
        &self,
        document: &Document,
        update: &UpdateDocument,
    ) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "UPDATE documents SET name = $1, description = $2, comment = $3, updated_at = $4 \
             WHERE id = $5 RETURNING *",
        )
        .bind(update.name.as_deref().unwrap_or(&document.name))
        .bind(
            update
                .description
                .as_deref()
                .unwrap_or(&document.description),
        )
        .bind(update.comment.as_deref().unwrap_or(&document.comment))
        .bind(Utc::now())
        .bind(document.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))
    }

    /// Delete a document. Attached sources go with it (FK cascade).
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
