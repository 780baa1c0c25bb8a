//! Request context carrying the resolved caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Extracted by the HTTP layer and passed into service methods so that
/// every operation knows *who* is acting. Authentication itself happens
/// upstream; only the resolved identity travels here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: i64,
    /// The acting user's name (scopes the group tree).
    pub username: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: i64, username: String) -> Self {
        Self {
            user_id,
            username,
            request_time: Utc::now(),
        }
    }
}
