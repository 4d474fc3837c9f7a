//! Persistence layer modules.

pub mod account_repo;
pub mod area_repo;
pub mod db;
pub mod demand_repo;
pub mod professional_repo;
pub mod schema;

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;
