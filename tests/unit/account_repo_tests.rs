//! Unit tests for `AccountRepo`.

use std::sync::Arc;

use chrono::Utc;

use redecom_admin::persistence::account_repo::{AccountRecord, AccountRepo};
use redecom_admin::persistence::db;
use redecom_admin::AppError;

fn record(uid: &str, email: &str) -> AccountRecord {
    AccountRecord {
        uid: uid.into(),
        email: email.into(),
        password_salt: "salt".into(),
        password_hash: "hash".into(),
        disabled: false,
        created_at: Utc::now(),
    }
}

async fn repo() -> AccountRepo {
    let db = db::connect_memory().await.expect("db");
    AccountRepo::new(Arc::new(db))
}

#[tokio::test]
async fn insert_and_find_by_email() {
    let repo = repo().await;
    repo.insert(&record("u1", "ana@example.org"))
        .await
        .expect("insert");

    let found = repo
        .find_by_email("ana@example.org")
        .await
        .expect("query")
        .expect("present");
    assert_eq!(found.uid, "u1");
    assert!(!found.disabled);
    assert!(repo
        .find_by_email("other@example.org")
        .await
        .expect("query")
        .is_none());
}

#[tokio::test]
async fn email_is_unique() {
    let repo = repo().await;
    repo.insert(&record("u1", "ana@example.org"))
        .await
        .expect("insert");
    let err = repo
        .insert(&record("u2", "ana@example.org"))
        .await
        .expect_err("duplicate email");
    assert!(matches!(err, AppError::Db(_)));
}

#[tokio::test]
async fn set_disabled_toggles_flag() {
    let repo = repo().await;
    repo.insert(&record("u1", "ana@example.org"))
        .await
        .expect("insert");

    repo.set_disabled("ana@example.org", true)
        .await
        .expect("disable");
    let found = repo
        .find_by_email("ana@example.org")
        .await
        .expect("query")
        .expect("present");
    assert!(found.disabled);

    repo.set_disabled("ana@example.org", false)
        .await
        .expect("enable");
    let found = repo
        .find_by_email("ana@example.org")
        .await
        .expect("query")
        .expect("present");
    assert!(!found.disabled);
}

#[tokio::test]
async fn set_disabled_on_missing_account_is_not_found() {
    let repo = repo().await;
    let err = repo
        .set_disabled("ghost@example.org", true)
        .await
        .expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}
