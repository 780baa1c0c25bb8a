//! Request DTOs with validation.
//!
//! Field length limits follow the model widths: group names up to 32
//! with descriptions up to 256; document and source names up to 200
//! with descriptions up to 1024; comments up to 1024 throughout.

use serde::{Deserialize, Serialize};
use validator::Validate;

use docindex_entity::document::{CreateDocument, UpdateDocument};
use docindex_entity::source::{CreateSource, UpdateSource};
use docindex_entity::tree::{CreateGroupNode, UpdateGroupNode};

/// Create group request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupRequest {
    /// Group name.
    #[validate(length(min = 1, max = 32, message = "Name must be 1-32 characters"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 256))]
    pub description: String,
    /// Comment.
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub comment: String,
}

impl From<CreateGroupRequest> for CreateGroupNode {
    fn from(req: CreateGroupRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            comment: req.comment,
        }
    }
}

/// Partial group update request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateGroupRequest {
    /// New name.
    #[validate(length(min = 1, max = 32, message = "Name must be 1-32 characters"))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(max = 256))]
    pub description: Option<String>,
    /// New comment.
    #[validate(length(max = 1024))]
    pub comment: Option<String>,
}

impl From<UpdateGroupRequest> for UpdateGroupNode {
    fn from(req: UpdateGroupRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            comment: req.comment,
        }
    }
}

/// Move group request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveGroupRequest {
    /// Target parent id; 0 moves the group to the root level.
    pub new_parent_id: i64,
}

/// Create document request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocumentRequest {
    /// Owning group id.
    pub group_id: i64,
    /// Document name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub description: String,
    /// Comment.
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub comment: String,
}

impl From<CreateDocumentRequest> for CreateDocument {
    fn from(req: CreateDocumentRequest) -> Self {
        Self {
            group_id: req.group_id,
            name: req.name,
            description: req.description,
            comment: req.comment,
        }
    }
}

/// Partial document update request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateDocumentRequest {
    /// New name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(max = 1024))]
    pub description: Option<String>,
    /// New comment.
    #[validate(length(max = 1024))]
    pub comment: Option<String>,
}

impl From<UpdateDocumentRequest> for UpdateDocument {
    fn from(req: UpdateDocumentRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            comment: req.comment,
        }
    }
}

/// Create source request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSourceRequest {
    /// Source name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    /// Description.
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub description: String,
    /// Original filename.
    #[validate(length(min = 1, max = 1024))]
    pub filename: String,
    /// MIME type.
    #[validate(length(max = 50))]
    pub mime_type: String,
    /// Comment.
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub comment: String,
}

impl From<CreateSourceRequest> for CreateSource {
    fn from(req: CreateSourceRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            filename: req.filename,
            mime_type: req.mime_type,
            comment: req.comment,
        }
    }
}

/// Partial source update request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSourceRequest {
    /// New name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(max = 1024))]
    pub description: Option<String>,
    /// New filename.
    #[validate(length(min = 1, max = 1024))]
    pub filename: Option<String>,
    /// New MIME type.
    #[validate(length(max = 50))]
    pub mime_type: Option<String>,
    /// New comment.
    #[validate(length(max = 1024))]
    pub comment: Option<String>,
}

impl From<UpdateSourceRequest> for UpdateSource {
    fn from(req: UpdateSourceRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            filename: req.filename,
            mime_type: req.mime_type,
            comment: req.comment,
        }
    }
}

/// Query parameters for document listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentListQuery {
    /// Restrict to documents owned by this group.
    pub group_id: Option<i64>,
}
