//! Area repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::area::Area;
use crate::{AppError, Result};

use super::db::Database;

/// Repository for reference area records.
#[derive(Clone)]
pub struct AreaRepo {
    db: Arc<Database>,
}

#[derive(sqlx::FromRow)]
struct AreaRow {
    name: String,
    display_name: String,
    active: i64,
    created_at: String,
    updated_at: String,
}

fn parse_ts(field: &str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::Db(format!("invalid {field}: {e}")))
}

impl AreaRow {
    fn into_area(self) -> Result<Area> {
        Ok(Area {
            created_at: parse_ts("created_at", &self.created_at)?,
            updated_at: parse_ts("updated_at", &self.updated_at)?,
            name: self.name,
            display_name: self.display_name,
            active: self.active != 0,
        })
    }
}

impl AreaRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or refresh an area keyed by name.
    ///
    /// An existing area keeps its original `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the upsert fails.
    pub async fn upsert(&self, area: &Area) -> Result<()> {
        sqlx::query(
            "INSERT INTO area (name, display_name, active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(name) DO UPDATE SET
                 display_name = excluded.display_name,
                 active = excluded.active,
                 updated_at = excluded.updated_at",
        )
        .bind(&area.name)
        .bind(&area.display_name)
        .bind(i64::from(area.active))
        .bind(area.created_at.to_rfc3339())
        .bind(area.updated_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Fetch every area. Malformed rows are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Area>> {
        let rows: Vec<AreaRow> = sqlx::query_as(
            "SELECT name, display_name, active, created_at, updated_at FROM area ORDER BY name",
        )
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let name = row.name.clone();
                row.into_area()
                    .map_err(|err| warn!(area = %name, %err, "skipping malformed area record"))
                    .ok()
            })
            .collect())
    }
}
