//! User repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use docindex_core::error::{AppError, ErrorKind};
use docindex_core::result::AppResult;
use docindex_entity::user::User;

/// Repository for user lookup and lazy registration.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// List all users, by username.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    /// Fetch the user for a gateway-authenticated username, registering
    /// the identity on first sight. Idempotent under concurrent first
    /// use via the unique username index.
    pub async fn get_or_create(&self, username: &str) -> AppResult<User> {
        if let Some(user) = self.find_by_username(username).await? {
            return Ok(user);
        }

        let now = Utc::now();
        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, created_at, updated_at) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(username)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => self
                .find_by_username(username)
                .await?
                .ok_or_else(|| AppError::database("User vanished after unique violation")),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to create user",
                e,
            )),
        }
    }
}
