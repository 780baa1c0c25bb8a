//! Source CRUD operations.

use std::sync::Arc;

use tracing::info;

use docindex_core::error::AppError;
use docindex_core::result::AppResult;
use docindex_database::repositories::document::DocumentRepository;
use docindex_database::repositories::source::SourceRepository;
use docindex_entity::source::{CreateSource, Source, UpdateSource};

use crate::context::RequestContext;

/// Manages the per-document source ledger.
#[derive(Debug, Clone)]
pub struct SourceService {
    /// Source repository.
    source_repo: Arc<SourceRepository>,
    /// Document repository, for ownership checks.
    document_repo: Arc<DocumentRepository>,
}

impl SourceService {
    /// Creates a new source service.
    pub fn new(source_repo: Arc<SourceRepository>, document_repo: Arc<DocumentRepository>) -> Self {
        Self {
            source_repo,
            document_repo,
        }
    }

    /// Gets a source by ID.
    pub async fn get_source(&self, source_id: i64) -> AppResult<Source> {
        self.source_repo
            .find_by_id(source_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Source {source_id} not found")))
    }

    /// Lists the sources of a document, in sequence order.
    pub async fn list_sources(&self, document_id: i64) -> AppResult<Vec<Source>> {
        self.require_document(document_id).await?;
        self.source_repo.find_by_document(document_id).await
    }

    /// Attaches a source to a document, assigning its sequence number.
    pub async fn add_source(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        data: CreateSource,
    ) -> AppResult<Source> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Source name cannot be empty"));
        }
        if data.filename.trim().is_empty() {
            return Err(AppError::validation("Source filename cannot be empty"));
        }

        self.require_document(document_id).await?;
        let source = self.source_repo.create(document_id, &data).await?;

        info!(
            user_id = ctx.user_id,
            source_id = source.id,
            document_id,
            sequence = source.sequence,
            "Source added"
        );

        Ok(source)
    }

    /// Partially updates a source's descriptive fields.
    pub async fn update_source(
        &self,
        ctx: &RequestContext,
        source_id: i64,
        update: UpdateSource,
    ) -> AppResult<Source> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Source name cannot be empty"));
            }
        }

        let source = self.get_source(source_id).await?;
        let updated = self.source_repo.update_fields(&source, &update).await?;

        info!(user_id = ctx.user_id, source_id, "Source updated");
        Ok(updated)
    }

    /// Detaches and deletes a source.
    pub async fn delete_source(&self, ctx: &RequestContext, source_id: i64) -> AppResult<()> {
        let source = self.get_source(source_id).await?;
        self.source_repo.delete(&source).await?;

        info!(user_id = ctx.user_id, source_id, "Source deleted");
        Ok(())
    }

    async fn require_document(&self, document_id: i64) -> AppResult<()> {
        self.document_repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))?;
        Ok(())
    }
}
