//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A document owned by exactly one group node.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    /// Unique document identifier.
    pub id: i64,
    /// The owning group node.
    pub group_id: i64,
    /// Document name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Free-form comment.
    pub comment: String,
    /// Number of sources attached to this document. Maintained in the
    /// same transaction as source insert/delete.
    pub source_count: i64,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Field values for creating a new document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDocument {
    /// The owning group node.
    pub group_id: i64,
    /// Document name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

/// Partial update of a document. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocument {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New comment.
    pub comment: Option<String>,
}
