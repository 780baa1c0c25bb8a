//! Document and source ledger behavior: ownership checks, sequence
//! assignment, and the denormalized source count.

mod helpers;

use docindex_core::error::ErrorKind;
use docindex_entity::document::{CreateDocument, UpdateDocument};
use docindex_entity::source::{CreateSource, UpdateSource};

use helpers::{login, make_root, setup};

fn document_data(group_id: i64, name: &str) -> CreateDocument {
    CreateDocument {
        group_id,
        name: name.to_string(),
        description: String::new(),
        comment: String::new(),
    }
}

fn source_data(name: &str, filename: &str) -> CreateSource {
    CreateSource {
        name: name.to_string(),
        description: String::new(),
        filename: filename.to_string(),
        mime_type: "application/pdf".to_string(),
        comment: String::new(),
    }
}

#[tokio::test]
async fn documents_require_an_existing_group() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let err = env
        .documents
        .create_document(&ctx, document_data(9999, "Orphan"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let group = make_root(&env, &ctx, "Reports").await;
    let doc = env
        .documents
        .create_document(&ctx, document_data(group.id, "Q3 report"))
        .await
        .unwrap();
    assert_eq!(doc.group_id, group.id);
    assert_eq!(doc.source_count, 0);
}

#[tokio::test]
async fn document_listing_filters_by_group() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let reports = make_root(&env, &ctx, "Reports").await;
    let notes = make_root(&env, &ctx, "Notes").await;

    env.documents
        .create_document(&ctx, document_data(reports.id, "Annual"))
        .await
        .unwrap();
    env.documents
        .create_document(&ctx, document_data(reports.id, "Quarterly"))
        .await
        .unwrap();
    env.documents
        .create_document(&ctx, document_data(notes.id, "Scratch"))
        .await
        .unwrap();

    let all = env.documents.list_documents(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let in_reports = env.documents.list_documents(Some(reports.id)).await.unwrap();
    assert_eq!(in_reports.len(), 2);
    assert!(in_reports.iter().all(|d| d.group_id == reports.id));
}

#[tokio::test]
async fn document_partial_update_keeps_absent_fields() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let group = make_root(&env, &ctx, "Reports").await;
    let doc = env
        .documents
        .create_document(
            &ctx,
            CreateDocument {
                group_id: group.id,
                name: "Draft".to_string(),
                description: "First pass".to_string(),
                comment: String::new(),
            },
        )
        .await
        .unwrap();

    let updated = env
        .documents
        .update_document(
            &ctx,
            doc.id,
            UpdateDocument {
                name: Some("Final".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Final");
    assert_eq!(updated.description, "First pass");
    assert_eq!(updated.group_id, group.id);
}

#[tokio::test]
async fn sequence_follows_the_highest_source_id() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let group = make_root(&env, &ctx, "Reports").await;
    let doc_a = env
        .documents
        .create_document(&ctx, document_data(group.id, "A"))
        .await
        .unwrap();
    let doc_b = env
        .documents
        .create_document(&ctx, document_data(group.id, "B"))
        .await
        .unwrap();

    // First source of any document gets sequence 1.
    let a1 = env
        .sources
        .add_source(&ctx, doc_a.id, source_data("scan", "scan.pdf"))
        .await
        .unwrap();
    assert_eq!(a1.sequence, 1);
    let b1 = env
        .sources
        .add_source(&ctx, doc_b.id, source_data("scan", "scan.pdf"))
        .await
        .unwrap();
    assert_eq!(b1.sequence, 1);

    // Later sources take the document's highest source id plus one, so
    // interleaved inserts leave per-document gaps.
    let a2 = env
        .sources
        .add_source(&ctx, doc_a.id, source_data("appendix", "appendix.pdf"))
        .await
        .unwrap();
    assert_eq!(a2.sequence, a1.id + 1);
    let b2 = env
        .sources
        .add_source(&ctx, doc_b.id, source_data("appendix", "appendix.pdf"))
        .await
        .unwrap();
    assert_eq!(b2.sequence, b1.id + 1);

    // Listing comes back in sequence order.
    let listed = env.sources.list_sources(doc_a.id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, [a1.id, a2.id]);
}

#[tokio::test]
async fn source_count_tracks_inserts_and_deletes() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let group = make_root(&env, &ctx, "Reports").await;
    let doc = env
        .documents
        .create_document(&ctx, document_data(group.id, "Counted"))
        .await
        .unwrap();

    let s1 = env
        .sources
        .add_source(&ctx, doc.id, source_data("one", "one.pdf"))
        .await
        .unwrap();
    env.sources
        .add_source(&ctx, doc.id, source_data("two", "two.pdf"))
        .await
        .unwrap();

    let doc = env.documents.get_document(doc.id).await.unwrap();
    assert_eq!(doc.source_count, 2);

    env.sources.delete_source(&ctx, s1.id).await.unwrap();
    let doc = env.documents.get_document(doc.id).await.unwrap();
    assert_eq!(doc.source_count, 1);
}

#[tokio::test]
async fn updating_a_source_never_moves_its_sequence() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let group = make_root(&env, &ctx, "Reports").await;
    let doc = env
        .documents
        .create_document(&ctx, document_data(group.id, "Stable"))
        .await
        .unwrap();
    let source = env
        .sources
        .add_source(&ctx, doc.id, source_data("original", "original.pdf"))
        .await
        .unwrap();

    let updated = env
        .sources
        .update_source(
            &ctx,
            source.id,
            UpdateSource {
                name: Some("renamed".to_string()),
                mime_type: Some("image/png".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.mime_type, "image/png");
    assert_eq!(updated.sequence, source.sequence);
    assert_eq!(updated.filename, source.filename);
}

#[tokio::test]
async fn deleting_a_document_takes_its_sources() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let group = make_root(&env, &ctx, "Reports").await;
    let doc = env
        .documents
        .create_document(&ctx, document_data(group.id, "Doomed"))
        .await
        .unwrap();
    let source = env
        .sources
        .add_source(&ctx, doc.id, source_data("attachment", "a.pdf"))
        .await
        .unwrap();

    env.documents.delete_document(&ctx, doc.id).await.unwrap();

    let err = env.documents.get_document(doc.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    let err = env.sources.get_source(source.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn sources_require_an_existing_document() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let err = env
        .sources
        .add_source(&ctx, 4242, source_data("lost", "lost.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = env.sources.list_sources(4242).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn blank_document_and_source_names_are_rejected() {
    let env = setup().await;
    let ctx = login(&env, "alice").await;

    let group = make_root(&env, &ctx, "Reports").await;

    let err = env
        .documents
        .create_document(&ctx, document_data(group.id, "  "))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let doc = env
        .documents
        .create_document(&ctx, document_data(group.id, "Valid"))
        .await
        .unwrap();

    let err = env
        .sources
        .add_source(&ctx, doc.id, source_data("", "file.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = env
        .sources
        .add_source(&ctx, doc.id, source_data("name", " "))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
