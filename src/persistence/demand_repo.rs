//! Demand repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::models::demand::{Demand, DemandStatus, Person, Requester};
use crate::{AppError, Result};

use super::db::Database;

/// Repository for demand records.
#[derive(Clone)]
pub struct DemandRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct DemandRow {
    id: String,
    subject: String,
    description: String,
    status: Option<i64>,
    created_at: Option<String>,
    needs: Option<String>,
    involved: Option<String>,
    links: Option<String>,
    edited_by: Option<String>,
    requester_uid: Option<String>,
    requester_name: Option<String>,
}

/// Decode an optional JSON array column; `NULL` reads as empty.
fn json_list<T: DeserializeOwned>(column: &str, raw: Option<&str>) -> Result<Vec<T>> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) => serde_json::from_str::<Option<Vec<T>>>(text)
            .map(Option::unwrap_or_default)
            .map_err(|e| AppError::Db(format!("invalid {column}: {e}"))),
    }
}

impl DemandRow {
    fn into_demand(self) -> Result<Demand> {
        let created_at = self
            .created_at
            .as_deref()
            .map(|raw| {
                chrono::DateTime::parse_from_rfc3339(raw)
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(|e| AppError::Db(format!("invalid created_at: {e}")))
            })
            .transpose()?;
        let needs = json_list("needs", self.needs.as_deref())?;
        let involved: Vec<Person> = json_list("involved", self.involved.as_deref())?;
        let links = json_list("links", self.links.as_deref())?;
        let requester = self.requester_name.map(|name| Requester {
            uid: self.requester_uid,
            name,
        });

        Ok(Demand {
            id: self.id,
            subject: self.subject,
            description: self.description,
            status: DemandStatus::from_code(self.status),
            created_at,
            needs,
            involved,
            links,
            edited_by: self.edited_by,
            requester,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, subject, description, status, created_at, needs, \
     involved, links, edited_by, requester_uid, requester_name FROM demand";

impl DemandRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a demand record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails, including id collisions.
    pub async fn insert(&self, demand: &Demand) -> Result<()> {
        sqlx::query(
            "INSERT INTO demand (id, subject, description, status, created_at, needs, involved,
                                 links, edited_by, requester_uid, requester_name)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&demand.id)
        .bind(&demand.subject)
        .bind(&demand.description)
        .bind(demand.status.code())
        .bind(demand.created_at.map(|ts| ts.to_rfc3339()))
        .bind(serde_json::to_string(&demand.needs)?)
        .bind(serde_json::to_string(&demand.involved)?)
        .bind(serde_json::to_string(&demand.links)?)
        .bind(&demand.edited_by)
        .bind(demand.requester.as_ref().and_then(|r| r.uid.clone()))
        .bind(demand.requester.as_ref().map(|r| r.name.clone()))
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Fetch every demand in insertion order.
    ///
    /// Rows that fail to parse are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Demand>> {
        let rows: Vec<DemandRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY rowid ASC"))
            .fetch_all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                match row.into_demand() {
                    Ok(demand) => Some(demand),
                    Err(err) => {
                        warn!(demand_id = %id, %err, "skipping malformed demand record");
                        None
                    }
                }
            })
            .collect())
    }

    /// Retrieve a demand by identifier.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no demand has `id`, or `AppError::Db`
    /// if the stored record is malformed.
    pub async fn get_by_id(&self, id: &str) -> Result<Demand> {
        let row: Option<DemandRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;
        row.ok_or_else(|| AppError::NotFound(format!("demand {id}")))?
            .into_demand()
    }

    /// Replace `involved` and `edited_by` on one demand, leaving every other
    /// column untouched.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no demand has `id`.
    pub async fn update_involved(&self, id: &str, involved: &[Person], editor: &str) -> Result<()> {
        let result = sqlx::query("UPDATE demand SET involved = ?1, edited_by = ?2 WHERE id = ?3")
            .bind(serde_json::to_string(involved)?)
            .bind(editor)
            .bind(id)
            .execute(self.db.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("demand {id}")));
        }
        Ok(())
    }
}
