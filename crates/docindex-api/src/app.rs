//! Application builder — wires repositories, services, and router into a
//! running server.

use std::sync::Arc;

use sqlx::SqlitePool;

use docindex_core::config::AppConfig;
use docindex_core::error::AppError;
use docindex_database::repositories::document::DocumentRepository;
use docindex_database::repositories::group::GroupNodeRepository;
use docindex_database::repositories::source::SourceRepository;
use docindex_database::repositories::tree::GroupTreeRepository;
use docindex_database::repositories::user::UserRepository;
use docindex_service::document::DocumentService;
use docindex_service::source::SourceService;
use docindex_service::tree::TreeService;
use docindex_service::user::UserService;

use crate::router::build_router;
use crate::state::AppState;

/// Construct the full application state over a connected pool.
pub fn build_state(config: AppConfig, db_pool: SqlitePool) -> AppState {
    let tree_repo = Arc::new(GroupTreeRepository::new(db_pool.clone()));
    let group_repo = Arc::new(GroupNodeRepository::new(db_pool.clone()));
    let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
    let source_repo = Arc::new(SourceRepository::new(db_pool.clone()));
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));

    let tree_service = Arc::new(TreeService::new(tree_repo, Arc::clone(&group_repo)));
    let document_service = Arc::new(DocumentService::new(
        Arc::clone(&document_repo),
        group_repo,
    ));
    let source_service = Arc::new(SourceService::new(source_repo, document_repo));
    let user_service = Arc::new(UserService::new(user_repo));

    AppState {
        config: Arc::new(config),
        db_pool,
        tree_service,
        document_service,
        source_service,
        user_service,
    }
}

/// Runs the HTTP server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: SqlitePool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Document index server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
