//! Shared test fixtures: an in-memory database with the full service
//! stack wired on top.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::sync::Arc;

use sqlx::SqlitePool;

use docindex_database::connection::create_memory_pool;
use docindex_database::migration::run_migrations;
use docindex_database::repositories::document::DocumentRepository;
use docindex_database::repositories::group::GroupNodeRepository;
use docindex_database::repositories::source::SourceRepository;
use docindex_database::repositories::tree::GroupTreeRepository;
use docindex_database::repositories::user::UserRepository;
use docindex_entity::tree::{CreateGroupNode, GroupNode};
use docindex_service::context::RequestContext;
use docindex_service::document::DocumentService;
use docindex_service::source::SourceService;
use docindex_service::tree::{ROOT_PARENT, TreeService};
use docindex_service::user::UserService;

/// Fully wired service stack over a fresh in-memory database.
pub struct TestEnv {
    pub pool: SqlitePool,
    pub trees: TreeService,
    pub documents: DocumentService,
    pub sources: SourceService,
    pub users: UserService,
}

pub async fn setup() -> TestEnv {
    let pool = create_memory_pool().await.expect("in-memory pool");
    run_migrations(&pool).await.expect("migrations");

    let tree_repo = Arc::new(GroupTreeRepository::new(pool.clone()));
    let group_repo = Arc::new(GroupNodeRepository::new(pool.clone()));
    let document_repo = Arc::new(DocumentRepository::new(pool.clone()));
    let source_repo = Arc::new(SourceRepository::new(pool.clone()));
    let user_repo = Arc::new(UserRepository::new(pool.clone()));

    TestEnv {
        pool,
        trees: TreeService::new(tree_repo, group_repo.clone()),
        documents: DocumentService::new(document_repo.clone(), group_repo),
        sources: SourceService::new(source_repo, document_repo),
        users: UserService::new(user_repo),
    }
}

/// Resolve `username` as the acting identity, registering it on first use.
pub async fn login(env: &TestEnv, username: &str) -> RequestContext {
    let user = env
        .users
        .resolve_identity(username)
        .await
        .expect("resolve identity");
    RequestContext::new(user.id, user.username)
}

pub fn group_data(name: &str) -> CreateGroupNode {
    CreateGroupNode {
        name: name.to_string(),
        description: String::new(),
        comment: String::new(),
    }
}

/// Create a group under `parent_id`, panicking on failure.
pub async fn make_group(
    env: &TestEnv,
    ctx: &RequestContext,
    parent_id: i64,
    name: &str,
) -> GroupNode {
    env.trees
        .create_group(ctx, parent_id, group_data(name))
        .await
        .expect("create group")
}

/// Create a root group in the caller's tree.
pub async fn make_root(env: &TestEnv, ctx: &RequestContext, name: &str) -> GroupNode {
    make_group(env, ctx, ROOT_PARENT, name).await
}
