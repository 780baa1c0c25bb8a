//! Document and source endpoints end to end.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn document_lifecycle_with_sources() {
    let app = TestApp::spawn().await;

    let group = app.create_group("alice", 0, "Reports").await;
    let doc = app.create_document("alice", group, "Q3 report").await;

    // Attach two sources.
    let (status, body) = app
        .request(
            "POST",
            &format!("/api/documents/{doc}/sources"),
            Some("alice"),
            Some(json!({
                "name": "scan",
                "filename": "scan.pdf",
                "mime_type": "application/pdf"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sequence"], 1);
    let first_source = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/documents/{doc}/sources"),
            Some("alice"),
            Some(json!({
                "name": "appendix",
                "filename": "appendix.pdf",
                "mime_type": "application/pdf"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // Detail carries the live count and the sources inline.
    let (status, body) = app
        .request("GET", &format!("/api/documents/{doc}"), Some("alice"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["source_count"], 2);
    assert_eq!(body["data"]["sources"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["sources"][0]["name"], "scan");

    // Deleting a source drops the count.
    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/sources/{first_source}"),
            Some("alice"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .request("GET", &format!("/api/documents/{doc}"), Some("alice"), None)
        .await;
    assert_eq!(body["data"]["source_count"], 1);
}

#[tokio::test]
async fn document_listing_filters_by_group() {
    let app = TestApp::spawn().await;

    let reports = app.create_group("alice", 0, "Reports").await;
    let notes = app.create_group("alice", 0, "Notes").await;
    app.create_document("alice", reports, "Annual").await;
    app.create_document("alice", notes, "Scratch").await;

    let (status, body) = app
        .request("GET", "/api/documents", Some("alice"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .request(
            "GET",
            &format!("/api/documents?group_id={reports}"),
            Some("alice"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Annual");
}

#[tokio::test]
async fn documents_need_a_real_group_and_sources_a_real_document() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .request(
            "POST",
            "/api/documents",
            Some("alice"),
            Some(json!({ "group_id": 9999, "name": "Orphan" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = app
        .request(
            "POST",
            "/api/documents/9999/sources",
            Some("alice"),
            Some(json!({
                "name": "lost",
                "filename": "lost.pdf",
                "mime_type": "application/pdf"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn source_update_preserves_sequence() {
    let app = TestApp::spawn().await;

    let group = app.create_group("alice", 0, "Reports").await;
    let doc = app.create_document("alice", group, "Stable").await;

    let (_, body) = app
        .request(
            "POST",
            &format!("/api/documents/{doc}/sources"),
            Some("alice"),
            Some(json!({
                "name": "original",
                "filename": "original.pdf",
                "mime_type": "application/pdf"
            })),
        )
        .await;
    let source = body["data"]["id"].as_i64().unwrap();
    let sequence = body["data"]["sequence"].as_i64().unwrap();

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/sources/{source}"),
            Some("alice"),
            Some(json!({ "name": "renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "renamed");
    assert_eq!(body["data"]["sequence"].as_i64(), Some(sequence));
    assert_eq!(body["data"]["filename"], "original.pdf");
}

#[tokio::test]
async fn document_and_source_names_allow_two_hundred_characters() {
    let app = TestApp::spawn().await;
    let group = app.create_group("alice", 0, "Reports").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/documents",
            Some("alice"),
            Some(json!({ "group_id": group, "name": "n".repeat(200) })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let doc = body["data"]["id"].as_i64().unwrap();

    let (status, _) = app
        .request(
            "POST",
            &format!("/api/documents/{doc}/sources"),
            Some("alice"),
            Some(json!({
                "name": "s".repeat(200),
                "filename": "scan.pdf",
                "mime_type": "application/pdf"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "POST",
            "/api/documents",
            Some("alice"),
            Some(json!({ "group_id": group, "name": "n".repeat(201) })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn users_appear_after_first_request() {
    let app = TestApp::spawn().await;

    app.create_group("alice", 0, "Anything").await;
    app.create_group("bob", 0, "Anything").await;

    let (status, body) = app.request("GET", "/api/users", Some("alice"), None).await;
    assert_eq!(status, StatusCode::OK);

    let usernames: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, ["alice", "bob"]);

    let id = body["data"][0]["id"].as_i64().unwrap();
    let (status, body) = app
        .request("GET", &format!("/api/users/{id}"), Some("alice"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
}
