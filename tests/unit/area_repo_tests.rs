//! Unit tests for `AreaRepo` upserts.

use std::sync::Arc;

use chrono::{Duration, Utc};

use redecom_admin::models::area::{Area, AreaSeed};
use redecom_admin::persistence::{area_repo::AreaRepo, db};

fn seed(name: &str, display: &str) -> AreaSeed {
    AreaSeed {
        name: name.into(),
        display_name: display.into(),
    }
}

async fn repo() -> AreaRepo {
    let db = db::connect_memory().await.expect("db");
    AreaRepo::new(Arc::new(db))
}

#[tokio::test]
async fn upsert_inserts_and_lists_by_name() {
    let repo = repo().await;
    let now = Utc::now();
    repo.upsert(&Area::from_seed(&seed("marketing", "Marketing"), now))
        .await
        .expect("upsert");
    repo.upsert(&Area::from_seed(&seed("design", "Design"), now))
        .await
        .expect("upsert");

    let names: Vec<String> = repo
        .list_all()
        .await
        .expect("list")
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, ["design", "marketing"]);
}

#[tokio::test]
async fn upsert_is_idempotent_and_keeps_created_at() {
    let repo = repo().await;
    let first = Utc::now() - Duration::days(30);
    repo.upsert(&Area::from_seed(&seed("design", "Design"), first))
        .await
        .expect("upsert");

    let mut inactive = Area::from_seed(&seed("design", "Design"), first);
    inactive.active = false;
    repo.upsert(&inactive).await.expect("deactivate");

    let later = Utc::now();
    repo.upsert(&Area::from_seed(&seed("design", "Design Gráfico"), later))
        .await
        .expect("reinitialize");

    let all = repo.list_all().await.expect("list");
    assert_eq!(all.len(), 1);
    let area = &all[0];
    assert!(area.active);
    assert_eq!(area.display_name, "Design Gráfico");
    assert_eq!(area.created_at.timestamp(), first.timestamp());
    assert_eq!(area.updated_at.timestamp(), later.timestamp());
}
