//! End-to-end test fixtures: the full router over an in-memory database.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use docindex_api::app::build_state;
use docindex_api::router::build_router;
use docindex_core::config::AppConfig;
use docindex_database::connection::create_memory_pool;
use docindex_database::migration::run_migrations;

/// The fully wired application over a fresh in-memory database.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let pool = create_memory_pool().await.expect("in-memory pool");
        run_migrations(&pool).await.expect("migrations");

        let state = build_state(AppConfig::default(), pool);
        Self {
            router: build_router(state),
        }
    }

    /// Send a request as `user` (None omits the identity header) and
    /// parse the JSON response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(username) = user {
            builder = builder.header("X-Auth-Request-User", username);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        (status, json)
    }

    /// Create a group under `parent_id` as `user` and return its id.
    pub async fn create_group(&self, user: &str, parent_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                &format!("/api/groups/parent/{parent_id}"),
                Some(user),
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create group failed: {body}");
        body["data"]["id"].as_i64().expect("group id")
    }

    /// Create a document in `group_id` as `user` and return its id.
    pub async fn create_document(&self, user: &str, group_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/api/documents",
                Some(user),
                Some(serde_json::json!({ "group_id": group_id, "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create document failed: {body}");
        body["data"]["id"].as_i64().expect("document id")
    }
}
