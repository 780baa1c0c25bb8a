//! Route definitions for the document index HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(group_routes())
        .merge(document_routes())
        .merge(source_routes())
        .merge(user_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Group tree CRUD, move, and annotated traversal
fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups/parent/{id}", get(handlers::group::list_children))
        .route("/groups/parent/{id}", post(handlers::group::create_group))
        .route("/groups/{id}", get(handlers::group::get_group))
        .route("/groups/{id}", put(handlers::group::update_group))
        .route("/groups/{id}", patch(handlers::group::update_group))
        .route("/groups/{id}", delete(handlers::group::delete_group))
        .route("/groups/{id}/move", patch(handlers::group::move_group))
        .route(
            "/groups/annotated_list/{id}",
            get(handlers::group::annotated_list),
        )
}

/// Document CRUD and per-document sources
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(handlers::document::list_documents))
        .route("/documents", post(handlers::document::create_document))
        .route("/documents/{id}", get(handlers::document::get_document))
        .route("/documents/{id}", put(handlers::document::update_document))
        .route(
            "/documents/{id}",
            patch(handlers::document::update_document),
        )
        .route(
            "/documents/{id}",
            delete(handlers::document::delete_document),
        )
        .route(
            "/documents/{id}/sources",
            get(handlers::source::list_sources),
        )
        .route("/documents/{id}/sources", post(handlers::source::add_source))
}

/// Source CRUD
fn source_routes() -> Router<AppState> {
    Router::new()
        .route("/sources/{id}", get(handlers::source::get_source))
        .route("/sources/{id}", put(handlers::source::update_source))
        .route("/sources/{id}", patch(handlers::source::update_source))
        .route("/sources/{id}", delete(handlers::source::delete_source))
}

/// User attribution endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users/{id}", get(handlers::user::get_user))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
