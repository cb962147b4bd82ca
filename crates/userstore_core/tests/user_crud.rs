mod common;

use mongodb::bson::doc;
use userstore_core::{ErrorKind, RepoError, UserDocument};

fn aaa() -> UserDocument {
    UserDocument::new("Aaa", 30, "AAA@mail.com")
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn rejected_create_writes_nothing() {
    let repo = common::open_repo_with_collections();

    let wrong_age = repo
        .create_user_document("info-1", &UserDocument::new("Aaa", -1, "AAA@mail.com"))
        .unwrap_err();
    assert_eq!(wrong_age.kind(), ErrorKind::InvalidAge);

    let lookup = repo.get_user_document_by_name("info-1", "Aaa").unwrap_err();
    assert_eq!(lookup.kind(), ErrorKind::NotFound);

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn create_returns_generated_id_and_rejects_identical_triple() {
    let repo = common::open_repo_with_collections();

    let doc = UserDocument::new("B", 30, "B@mail.com");
    let id = repo.create_user_document("info-1", &doc).unwrap();
    assert!(id.as_object_id().is_some());

    let err = repo.create_user_document("info-1", &doc).unwrap_err();
    match err {
        RepoError::DocumentExists { collection, name } => {
            assert_eq!(collection, "info-1");
            assert_eq!(name, "B");
        }
        other => panic!("unexpected error: {other}"),
    }

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn create_allows_same_name_with_different_fields() {
    let repo = common::open_repo_with_collections();

    repo.create_user_document("info-1", &UserDocument::new("B", 30, "B@mail.com"))
        .unwrap();
    repo.create_user_document("info-1", &UserDocument::new("B", 31, "B@mail.com"))
        .unwrap();

    assert_eq!(repo.delete_user_document_by_name("info-1", "B").unwrap(), 1);
    assert_eq!(repo.delete_user_document_by_name("info-1", "B").unwrap(), 1);
    assert_eq!(repo.delete_user_document_by_name("info-1", "B").unwrap(), 0);

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn update_without_match_is_not_an_upsert() {
    let repo = common::open_repo_with_collections();

    let err = repo
        .update_user_document_by_name("info-1", "Nobody", &aaa())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMatch);

    let lookup = repo.get_user_document_by_name("info-1", "Aaa").unwrap_err();
    assert_eq!(lookup.kind(), ErrorKind::NotFound);

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn update_then_read_returns_new_values() {
    let repo = common::open_repo_with_collections();

    repo.create_user_document("info-1", &UserDocument::new("Aaa", 30, "Bbb@mail.com"))
        .unwrap();

    let updated = UserDocument::new("Aaa", 33, "Bbb@mail.com");
    repo.update_user_document_by_name("info-1", "Aaa", &updated)
        .unwrap();

    let loaded = repo.get_user_document_by_name("info-1", "Aaa").unwrap();
    assert_eq!(loaded, updated);

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn get_reports_not_found_for_unknown_name() {
    let repo = common::open_repo_with_collections();

    let missing = repo.get_user_document_by_name("info-1", "B").unwrap_err();
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn get_decodes_age_stored_as_double() {
    let repo = common::open_repo_with_collections();
    let record = doc! { "name": "Js", "age": 30.0_f64, "email": "js@mail.com" };
    common::insert_raw(&repo, "info-1", record);

    let loaded = repo.get_user_document_by_name("info-1", "Js").unwrap();
    assert_eq!(loaded, UserDocument::new("Js", 30, "js@mail.com"));

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn create_then_get_roundtrip() {
    let repo = common::open_repo_with_collections();

    let doc = UserDocument::new("Aaa", 20, "AAA@mail.com");
    repo.create_user_document("info-1", &doc).unwrap();

    let loaded = repo.get_user_document_by_name("info-1", &doc.name).unwrap();
    assert_eq!(loaded.name, doc.name);
    assert_eq!(loaded.age, doc.age);
    assert_eq!(loaded.email, doc.email);

    common::drop_and_close(repo);
}

#[test]
#[ignore = "requires USERSTORE_TEST_MONGODB_URI"]
fn delete_missing_returns_zero_and_existing_returns_one() {
    let repo = common::open_repo_with_collections();

    assert_eq!(repo.delete_user_document_by_name("info-1", "CCC").unwrap(), 0);

    let doc = UserDocument::new("Ccc", 30, "Ccc@mail.com");
    repo.create_user_document("info-1", &doc).unwrap();
    assert_eq!(repo.delete_user_document_by_name("info-1", &doc.name).unwrap(), 1);

    let err = repo.get_user_document_by_name("info-1", &doc.name).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    common::drop_and_close(repo);
}
