//! Professional repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::professional::{Professional, ProfessionalForm, ProfessionalKind};
use crate::{AppError, Result};

use super::db::Database;

/// Repository for professional records.
#[derive(Clone)]
pub struct ProfessionalRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct ProfessionalRow {
    id: String,
    email: String,
    full_name: String,
    whatsapp: String,
    area: String,
    birth_day: String,
    gender: String,
    kind: Option<i64>,
    manager: String,
    manager_email: String,
    manager_whatsapp: String,
    data_auth: i64,
    terms: i64,
}

impl From<ProfessionalRow> for Professional {
    fn from(row: ProfessionalRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            whatsapp: row.whatsapp,
            area: row.area,
            birth_day: row.birth_day,
            gender: row.gender,
            kind: ProfessionalKind::from_code(row.kind),
            manager: row.manager,
            manager_email: row.manager_email,
            manager_whatsapp: row.manager_whatsapp,
            data_auth: row.data_auth != 0,
            terms: row.terms != 0,
        }
    }
}

impl ProfessionalRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a professional record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails, including id collisions.
    pub async fn insert(&self, professional: &Professional) -> Result<()> {
        sqlx::query(
            "INSERT INTO professional (id, email, full_name, whatsapp, area, birth_day, gender,
                                       kind, manager, manager_email, manager_whatsapp,
                                       data_auth, terms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&professional.id)
        .bind(&professional.email)
        .bind(&professional.full_name)
        .bind(&professional.whatsapp)
        .bind(&professional.area)
        .bind(&professional.birth_day)
        .bind(&professional.gender)
        .bind(professional.kind.code())
        .bind(&professional.manager)
        .bind(&professional.manager_email)
        .bind(&professional.manager_whatsapp)
        .bind(i64::from(professional.data_auth))
        .bind(i64::from(professional.terms))
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Fetch every professional record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Professional>> {
        let rows: Vec<ProfessionalRow> = sqlx::query_as(
            "SELECT id, email, full_name, whatsapp, area, birth_day, gender, kind, manager,
                    manager_email, manager_whatsapp, data_auth, terms
             FROM professional
             ORDER BY rowid ASC",
        )
        .fetch_all(self.db.as_ref())
        .await?;
        Ok(rows.into_iter().map(Professional::from).collect())
    }

    /// Overwrite the editable profile fields of one professional.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no professional has `id`.
    pub async fn update_profile(&self, id: &str, form: &ProfessionalForm) -> Result<()> {
        let result = sqlx::query(
            "UPDATE professional
             SET full_name = ?1, whatsapp = ?2, area = ?3, birth_day = ?4, gender = ?5,
                 kind = ?6, manager = ?7, manager_email = ?8, manager_whatsapp = ?9
             WHERE id = ?10",
        )
        .bind(&form.full_name)
        .bind(&form.whatsapp)
        .bind(&form.area)
        .bind(&form.birth_day)
        .bind(&form.gender)
        .bind(form.kind.code())
        .bind(&form.manager)
        .bind(&form.manager_email)
        .bind(&form.manager_whatsapp)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("professional {id}")));
        }
        Ok(())
    }
}
