//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::SqlitePool;

use docindex_core::config::AppConfig;
use docindex_service::document::DocumentService;
use docindex_service::source::SourceService;
use docindex_service::tree::TreeService;
use docindex_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// SQLite connection pool
    pub db_pool: SqlitePool,
    /// Group tree service
    pub tree_service: Arc<TreeService>,
    /// Document service
    pub document_service: Arc<DocumentService>,
    /// Source service
    pub source_service: Arc<SourceService>,
    /// User attribution service
    pub user_service: Arc<UserService>,
}
