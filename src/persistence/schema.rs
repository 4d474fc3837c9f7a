//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS` and are safe to
//! re-run on every startup.

use sqlx::SqlitePool;

use crate::Result;

/// Apply all table definitions to the connected `SQLite` database.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS demand (
    id              TEXT PRIMARY KEY NOT NULL,
    subject         TEXT NOT NULL DEFAULT '',
    description     TEXT NOT NULL DEFAULT '',
    status          INTEGER,
    created_at      TEXT,
    needs           TEXT,
    involved        TEXT,
    links           TEXT,
    edited_by       TEXT,
    requester_uid   TEXT,
    requester_name  TEXT
);

CREATE TABLE IF NOT EXISTS professional (
    id               TEXT PRIMARY KEY NOT NULL,
    email            TEXT NOT NULL DEFAULT '',
    full_name        TEXT NOT NULL DEFAULT '',
    whatsapp         TEXT NOT NULL DEFAULT '',
    area             TEXT NOT NULL DEFAULT '',
    birth_day        TEXT NOT NULL DEFAULT '',
    gender           TEXT NOT NULL DEFAULT '',
    kind             INTEGER,
    manager          TEXT NOT NULL DEFAULT '',
    manager_email    TEXT NOT NULL DEFAULT '',
    manager_whatsapp TEXT NOT NULL DEFAULT '',
    data_auth        INTEGER NOT NULL DEFAULT 0,
    terms            INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS area (
    name            TEXT PRIMARY KEY NOT NULL,
    display_name    TEXT NOT NULL,
    active          INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS account (
    uid             TEXT PRIMARY KEY NOT NULL,
    email           TEXT NOT NULL UNIQUE,
    password_salt   TEXT NOT NULL,
    password_hash   TEXT NOT NULL,
    disabled        INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_professional_area ON professional(area);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
