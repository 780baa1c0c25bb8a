//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docindex_entity::document::Document;
use docindex_entity::source::Source;
use docindex_entity::tree::{AnnotatedNode, GroupNode, TraversalInfo};
use docindex_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Database status.
    pub database: String,
}

/// Group node summary for responses.
///
/// `parent` is the parent node id, 0 for roots; `numchild` is the direct
/// child count. Materialized path internals are never exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupResponse {
    /// Node id.
    pub id: i64,
    /// Creating user id.
    pub owner_id: i64,
    /// Group name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Comment.
    pub comment: String,
    /// Parent node id, 0 for roots.
    pub parent: i64,
    /// Direct child count.
    pub numchild: i64,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl GroupResponse {
    /// Builds the response from a node and its resolved annotations.
    pub fn from_parts(node: GroupNode, parent: i64, numchild: i64) -> Self {
        Self {
            id: node.id,
            owner_id: node.owner_id,
            name: node.name,
            description: node.description,
            comment: node.comment,
            parent,
            numchild,
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }
}

/// One item of an annotated depth-first listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedGroupResponse {
    /// Node id.
    pub id: i64,
    /// Group name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Comment.
    pub comment: String,
    /// Traversal markers (open/close/level).
    pub info: TraversalInfo,
}

impl From<AnnotatedNode> for AnnotatedGroupResponse {
    fn from(node: AnnotatedNode) -> Self {
        Self {
            id: node.group.id,
            name: node.group.name,
            description: node.group.description,
            comment: node.group.comment,
            info: node.info,
        }
    }
}

/// Source summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceResponse {
    /// Source id.
    pub id: i64,
    /// Owning document id.
    pub document_id: i64,
    /// Source name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Ordering number within the document.
    pub sequence: i64,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// Comment.
    pub comment: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Source> for SourceResponse {
    fn from(source: Source) -> Self {
        Self {
            id: source.id,
            document_id: source.document_id,
            name: source.name,
            description: source.description,
            sequence: source.sequence,
            filename: source.filename,
            mime_type: source.mime_type,
            comment: source.comment,
            created_at: source.created_at,
            updated_at: source.updated_at,
        }
    }
}

/// Document with its attached sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    /// Document id.
    pub id: i64,
    /// Owning group id.
    pub group_id: i64,
    /// Document name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Comment.
    pub comment: String,
    /// Number of attached sources.
    pub source_count: i64,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Attached sources, in sequence order.
    pub sources: Vec<SourceResponse>,
}

impl DocumentResponse {
    /// Builds the response from a document and its source rows.
    pub fn from_parts(document: Document, sources: Vec<Source>) -> Self {
        Self {
            id: document.id,
            group_id: document.group_id,
            name: document.name,
            description: document.description,
            comment: document.comment,
            source_count: document.source_count,
            created_at: document.created_at,
            updated_at: document.updated_at,
            sources: sources.into_iter().map(SourceResponse::from).collect(),
        }
    }
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}
