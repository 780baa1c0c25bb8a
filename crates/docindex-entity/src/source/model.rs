//! Source entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A file attachment record owned by exactly one document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Source {
    /// Unique source identifier.
    pub id: i64,
    /// The owning document.
    pub document_id: i64,
    /// Source name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Ordering number assigned at insert time: one more than the highest
    /// source id currently attached to the document, or 1 when the
    /// document has none. Values are distinct per document but not a
    /// contiguous 1..N run when inserts across documents interleave.
    pub sequence: i64,
    /// Original filename.
    pub filename: String,
    /// MIME type of the attachment.
    pub mime_type: String,
    /// Free-form comment.
    pub comment: String,
    /// When the source was created.
    pub created_at: DateTime<Utc>,
    /// When the source was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Field values for creating a new source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSource {
    /// Source name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Original filename.
    pub filename: String,
    /// MIME type of the attachment.
    pub mime_type: String,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

/// Partial update of a source. Absent fields are left untouched; the
/// sequence number is never rewritten after insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSource {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New filename.
    pub filename: Option<String>,
    /// New MIME type.
    pub mime_type: Option<String>,
    /// New comment.
    pub comment: Option<String>,
}
