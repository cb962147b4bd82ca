#![allow(dead_code)]

use mongodb::bson::Document;
use userstore_core::Repository;
use uuid::Uuid;

/// Base server URI without a database path, e.g. `mongodb://localhost:27017`.
///
/// Tests that need it are `#[ignore]`d; run them with `cargo test -- --ignored`.
pub const TEST_URI_ENV: &str = "USERSTORE_TEST_MONGODB_URI";

pub const COLLECTIONS: [&str; 2] = ["info-1", "info-2"];

pub fn base_uri() -> String {
    let base = std::env::var(TEST_URI_ENV)
        .unwrap_or_else(|_| panic!("{TEST_URI_ENV} must be set for live tests"));
    let base = base.trim().trim_end_matches('/').to_string();
    assert!(!base.is_empty(), "{TEST_URI_ENV} is empty");
    base
}

/// Builds a DSN pointing at a fresh database on the configured server.
pub fn unique_dsn() -> String {
    format!("{}/userstore_test_{}", base_uri(), Uuid::new_v4().simple())
}

/// Writes `record` as-is, bypassing `UserDocument` encoding.
pub fn insert_raw(repo: &Repository, collection: &str, record: Document) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let client = mongodb::Client::with_uri_str(base_uri()).await.unwrap();
        client
            .database(repo.database_name())
            .collection::<Document>(collection)
            .insert_one(record)
            .await
            .unwrap();
        client.shutdown().await;
    });
}

/// Connects to a fresh database.
pub fn open_repo() -> Repository {
    Repository::connect(&unique_dsn()).unwrap()
}

/// Connects and ensures `info-1` and `info-2` exist.
pub fn open_repo_with_collections() -> Repository {
    let repo = open_repo();
    repo.ensure_collections(Some(&COLLECTIONS[..])).unwrap();
    repo
}

pub fn drop_and_close(mut repo: Repository) {
    for collection in COLLECTIONS {
        repo.drop_collection(collection).unwrap();
    }
    repo.close().unwrap();
}
