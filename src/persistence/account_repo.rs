//! Sign-in account repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{AppError, Result};

use super::db::Database;

/// Stored credential for one sign-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Account identity, shared with the professional record.
    pub uid: String,
    /// Sign-in email, stored lower-cased.
    pub email: String,
    /// Per-account random salt.
    pub password_salt: String,
    /// Hex digest of salt and password.
    pub password_hash: String,
    /// Disabled accounts cannot sign in.
    pub disabled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    uid: String,
    email: String,
    password_salt: String,
    password_hash: String,
    disabled: i64,
    created_at: String,
}

impl AccountRow {
    fn into_record(self) -> Result<AccountRecord> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| AppError::Db(format!("invalid created_at: {e}")))?
            .with_timezone(&Utc);
        Ok(AccountRecord {
            uid: self.uid,
            email: self.email,
            password_salt: self.password_salt,
            password_hash: self.password_hash,
            disabled: self.disabled != 0,
            created_at,
        })
    }
}

/// Repository for sign-in accounts.
#[derive(Clone)]
pub struct AccountRepo {
    db: Arc<Database>,
}

impl AccountRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails, including a duplicate email.
    pub async fn insert(&self, account: &AccountRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO account (uid, email, password_salt, password_hash, disabled, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&account.uid)
        .bind(&account.email)
        .bind(&account.password_salt)
        .bind(&account.password_hash)
        .bind(i64::from(account.disabled))
        .bind(account.created_at.to_rfc3339())
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// Look up an account by its (lower-cased) email.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails or the row is malformed.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT uid, email, password_salt, password_hash, disabled, created_at
             FROM account WHERE email = ?1",
        )
        .bind(email)
        .fetch_optional(self.db.as_ref())
        .await?;
        row.map(AccountRow::into_record).transpose()
    }

    /// Enable or disable the account registered for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no account uses `email`.
    pub async fn set_disabled(&self, email: &str, disabled: bool) -> Result<()> {
        let result = sqlx::query("UPDATE account SET disabled = ?1 WHERE email = ?2")
            .bind(i64::from(disabled))
            .bind(email)
            .execute(self.db.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("account {email}")));
        }
        Ok(())
    }
}
