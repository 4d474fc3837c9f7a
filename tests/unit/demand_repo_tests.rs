//! Unit tests for `DemandRepo` against in-memory `SQLite`.

use std::sync::Arc;

use redecom_admin::models::demand::{DemandStatus, Requester};
use redecom_admin::persistence::{db, demand_repo::DemandRepo};
use redecom_admin::AppError;

use crate::support::fake_store::{demand, person};

async fn repo() -> (DemandRepo, Arc<db::Database>) {
    let db = Arc::new(db::connect_memory().await.expect("db"));
    (DemandRepo::new(Arc::clone(&db)), db)
}

#[tokio::test]
async fn insert_and_get_round_trip_fields() {
    let (repo, _db) = repo().await;
    let mut d = demand("d1", "Post Instagram", &["social media", "design"]);
    d.description = "Divulgação do evento".into();
    d.status = DemandStatus::Completed;
    d.involved = vec![person("p1", "Ana")];
    d.links = vec!["https://example.org/arte.png".into()];
    d.requester = Some(Requester {
        uid: Some("u9".into()),
        name: "Maria".into(),
    });
    repo.insert(&d).await.expect("insert");

    let loaded = repo.get_by_id("d1").await.expect("get");
    assert_eq!(loaded.subject, "Post Instagram");
    assert_eq!(loaded.needs, d.needs);
    assert_eq!(loaded.involved, d.involved);
    assert_eq!(loaded.links, d.links);
    assert_eq!(loaded.status, DemandStatus::Completed);
    assert_eq!(loaded.requester, d.requester);
    assert!(loaded.created_at.is_some());
}

#[tokio::test]
async fn list_all_keeps_insertion_order() {
    let (repo, _db) = repo().await;
    for (id, subject) in [("d3", "C"), ("d1", "A"), ("d2", "B")] {
        repo.insert(&demand(id, subject, &[])).await.expect("insert");
    }
    let ids: Vec<String> = repo
        .list_all()
        .await
        .expect("list")
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, ["d3", "d1", "d2"]);
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let (repo, _db) = repo().await;
    let err = repo.get_by_id("nope").await.expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn update_involved_touches_only_involved_and_editor() {
    let (repo, _db) = repo().await;
    let mut d = demand("d1", "Flyer", &["design"]);
    d.description = "A5 frente e verso".into();
    d.status = DemandStatus::InProgress;
    repo.insert(&d).await.expect("insert");

    let involved = vec![person("p1", "Ana"), person("p2", "Bruno")];
    repo.update_involved("d1", &involved, "Admin")
        .await
        .expect("update");

    let loaded = repo.get_by_id("d1").await.expect("get");
    assert_eq!(loaded.involved, involved);
    assert_eq!(loaded.edited_by.as_deref(), Some("Admin"));
    assert_eq!(loaded.description, "A5 frente e verso");
    assert_eq!(loaded.status, DemandStatus::InProgress);
    assert_eq!(loaded.needs, vec!["design".to_owned()]);
}

#[tokio::test]
async fn update_involved_on_missing_demand_is_not_found() {
    let (repo, _db) = repo().await;
    let err = repo
        .update_involved("ghost", &[], "Admin")
        .await
        .expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn null_columns_read_as_empty_and_unknown() {
    let (repo, db) = repo().await;
    sqlx::query("INSERT INTO demand (id, subject) VALUES ('d1', 'Legado')")
        .execute(db.as_ref())
        .await
        .expect("raw insert");

    let loaded = repo.get_by_id("d1").await.expect("get");
    assert!(loaded.needs.is_empty());
    assert!(loaded.involved.is_empty());
    assert_eq!(loaded.status.label(), "Desconhecido");
    assert!(loaded.requester.is_none());
}

#[tokio::test]
async fn malformed_rows_are_skipped_in_listing() {
    let (repo, db) = repo().await;
    repo.insert(&demand("d1", "Bom", &["design"]))
        .await
        .expect("insert");
    sqlx::query("INSERT INTO demand (id, subject, needs) VALUES ('d2', 'Ruim', 'not json')")
        .execute(db.as_ref())
        .await
        .expect("raw insert");

    let all = repo.list_all().await.expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "d1");
    assert!(matches!(repo.get_by_id("d2").await, Err(AppError::Db(_))));
}

#[tokio::test]
async fn duplicate_id_is_db_error() {
    let (repo, _db) = repo().await;
    repo.insert(&demand("d1", "A", &[])).await.expect("insert");
    let err = repo
        .insert(&demand("d1", "B", &[]))
        .await
        .expect_err("duplicate");
    assert!(matches!(err, AppError::Db(_)));
}
