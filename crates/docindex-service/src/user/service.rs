//! Read-only user listing and lazy identity registration.

use std::sync::Arc;

use docindex_core::error::AppError;
use docindex_core::result::AppResult;
use docindex_database::repositories::user::UserRepository;
use docindex_entity::user::User;

/// Serves user attribution lookups.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Gets a user by ID.
    pub async fn get_user(&self, user_id: i64) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Lists all known users.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.user_repo.find_all().await
    }

    /// Resolves a gateway-authenticated username to a user record,
    /// registering it on first sight.
    pub async fn resolve_identity(&self, username: &str) -> AppResult<User> {
        self.user_repo.get_or_create(username).await
    }
}
