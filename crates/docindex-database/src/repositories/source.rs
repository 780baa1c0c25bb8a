//! Source repository implementation.
//!
//! Sequence assignment and the document's denormalized `source_count`
//! are written in the same transaction as the source row, so concurrent
//! inserts can neither duplicate a sequence value nor skew the count.

use chrono::Utc;
use sqlx::SqlitePool;

use docindex_core::error::{AppError, ErrorKind};
use docindex_core::result::AppResult;
use docindex_entity::source::{CreateSource, Source, UpdateSource};

/// Repository for source CRUD.
#[derive(Debug, Clone)]
pub struct SourceRepository {
    pool: SqlitePool,
}

impl SourceRepository {
    /// Create a new source repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a source by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Source>> {
        sqlx::query_as::<_, Source>("SELECT * FROM sources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find source", e))
    }

    /// List sources attached to a document, in sequence order.
    pub async fn find_by_document(&self, document_id: i64) -> AppResult<Vec<Source>> {
        sqlx::query_as::<_, Source>(
            "SELECT * FROM sources WHERE document_id = $1 ORDER BY sequence, id",
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list sources by document", e)
        })
    }

    /// Insert a source for a document.
    ///
    /// The sequence is one more than the highest source id currently
    /// attached to the document (1 when there is none) — the historical
    /// assignment rule, kept as observed. The owning document's
    /// `source_count` is bumped in the same transaction.
    pub async fn create(&self, document_id: i64, data: &CreateSource) -> AppResult<Source> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open transaction", e)
        })?;

        let max_id: Option<i64> =
            sqlx::query_scalar("SELECT MAX(id) FROM sources WHERE document_id = $1")
                .bind(document_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to compute sequence", e)
                })?;
        let sequence = max_id.map_or(1, |id| id + 1);

        let now = Utc::now();
        let source = sqlx::query_as::<_, Source>(
            "INSERT INTO sources \
             (document_id, name, description, sequence, filename, mime_type, comment, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(document_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(sequence)
        .bind(&data.filename)
        .bind(&data.mime_type)
        .bind(&data.comment)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create source", e))?;

        sqlx::query(
            "UPDATE documents SET source_count = source_count + 1, updated_at = $1 WHERE id = $2",
        )
        .bind(now)
        .bind(document_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to bump source count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit source insert", e)
        })?;

        Ok(source)
    }

    /// Apply a partial field update. The sequence is never rewritten.
    pub async fn update_fields(&self, source: &Source, update: &UpdateSource) -> AppResult<Source> {
        sqlx::query_as::<_, Source>(
            "UPDATE sources SET name = $1, description = $2, filename = $3, mime_type = $4, \
             comment = $5, updated_at = $6 WHERE id = $7 RETURNING *",
        )
        .bind(update.name.as_deref().unwrap_or(&source.name))
        .bind(update.description.as_deref().unwrap_or(&source.description))
        .bind(update.filename.as_deref().unwrap_or(&source.filename))
        .bind(update.mime_type.as_deref().unwrap_or(&source.mime_type))
        .bind(update.comment.as_deref().unwrap_or(&source.comment))
        .bind(Utc::now())
        .bind(source.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update source", e))
    }

    /// Delete a source, decrementing the owning document's count in the
    /// same transaction.
    pub async fn delete(&self, source: &Source) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to open transaction", e)
        })?;

        sqlx::query("DELETE FROM sources WHERE id = $1")
            .bind(source.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete source", e))?;

        sqlx::query(
            "UPDATE documents SET source_count = source_count - 1, updated_at = $1 \
             WHERE id = $2 AND source_count > 0",
        )
        .bind(Utc::now())
        .bind(source.document_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to lower source count", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit source delete", e)
        })?;

        Ok(())
    }
}
