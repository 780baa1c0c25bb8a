//! Document CRUD operations.

use std::sync::Arc;

use tracing::info;

use docindex_core::error::AppError;
use docindex_core::result::AppResult;
use docindex_database::repositories::document::DocumentRepository;
use docindex_database::repositories::group::GroupNodeRepository;
use docindex_entity::document::{CreateDocument, Document, UpdateDocument};

use crate::context::RequestContext;

/// Manages the flat, group-scoped document ledger.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    document_repo: Arc<DocumentRepository>,
    /// Group node repository, for ownership checks.
    group_repo: Arc<GroupNodeRepository>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<DocumentRepository>,
        group_repo: Arc<GroupNodeRepository>,
    ) -> Self {
        Self {
            document_repo,
            group_repo,
        }
    }

    /// Gets a document by ID.
    pub async fn get_document(&self, document_id: i64) -> AppResult<Document> {
        self.document_repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    /// Lists documents, optionally restricted to one group.
    pub async fn list_documents(&self, group_id: Option<i64>) -> AppResult<Vec<Document>> {
        match group_id {
            Some(id) => self.document_repo.find_by_group(id).await,
            None => self.document_repo.find_all().await,
        }
    }

    /// Creates a document under an existing group.
    pub async fn create_document(
        &self,
        ctx: &RequestContext,
        data: CreateDocument,
    ) -> AppResult<Document> {
        if data.name.trim().is_empty() {
            return Err(AppError::validation("Document name cannot be empty"));
        }

        self.group_repo
            .find_by_id(data.group_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Group {} not found", data.group_id)))?;

        let document = self.document_repo.create(&data).await?;

        info!(
            user_id = ctx.user_id,
            document_id = document.id,
            group_id = document.group_id,
            "Document created"
        );

        Ok(document)
    }

    /// Partially updates a document's name/description/comment.
    pub async fn update_document(
        &self,
        ctx: &RequestContext,
        document_id: i64,
        update: UpdateDocument,
    ) -> AppResult<Document> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Document name cannot be empty"));
            }
        }

        let document = self.get_document(document_id).await?;
        let updated = self.document_repo.update_fields(&document, &update).await?;

        info!(user_id = ctx.user_id, document_id, "Document updated");
        Ok(updated)
    }

    /// Deletes a document and its sources.
    pub async fn delete_document(&self, ctx: &RequestContext, document_id: i64) -> AppResult<()> {
        let document = self.get_document(document_id).await?;
        self.document_repo.delete(document.id).await?;

        info!(user_id = ctx.user_id, document_id, "Document deleted");
        Ok(())
    }
}
