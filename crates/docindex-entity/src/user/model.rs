//! User entity model.
//!
//! Authentication happens upstream; this record exists for attribution
//! and the read-only user listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A known user identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique username.
    pub username: String,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
    /// When the user record was last updated.
    pub updated_at: DateTime<Utc>,
}
