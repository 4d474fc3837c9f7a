//! Record store abstraction.
//!
//! The [`RecordStore`] trait is the single source of truth for demands,
//! professionals and areas. Console sessions only ever hold copies; every
//! change goes through one of these calls first.

pub mod sqlite;

use std::future::Future;
use std::pin::Pin;

use crate::models::area::Area;
use crate::models::demand::{Demand, Person};
use crate::models::professional::{Professional, ProfessionalForm};
use crate::Result;

pub use sqlite::SqliteStore;

/// Boxed future returned by [`RecordStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Collection-scoped access to the console's records.
pub trait RecordStore: Send + Sync {
    /// Fetch every demand.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the store cannot be queried.
    fn list_demands(&self) -> StoreFuture<'_, Vec<Demand>>;

    /// Create a demand under its own id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the write fails.
    fn insert_demand<'a>(&'a self, demand: &'a Demand) -> StoreFuture<'a, ()>;

    /// Partial update of one demand: sets `involved` and `editedBy` only.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`](crate::AppError::NotFound) if `id` is unknown,
    /// or [`AppError::Db`](crate::AppError::Db) if the write fails.
    fn update_demand_involved<'a>(
        &'a self,
        id: &'a str,
        involved: &'a [Person],
        editor: &'a str,
    ) -> StoreFuture<'a, ()>;

    /// Fetch every professional account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the store cannot be queried.
    fn list_professionals(&self) -> StoreFuture<'_, Vec<Professional>>;

    /// Partial update of a professional's profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`](crate::AppError::NotFound) if `id` is unknown,
    /// or [`AppError::Db`](crate::AppError::Db) if the write fails.
    fn update_professional<'a>(
        &'a self,
        id: &'a str,
        form: &'a ProfessionalForm,
    ) -> StoreFuture<'a, ()>;

    /// Create a professional under its own id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the write fails.
    fn create_professional<'a>(&'a self, professional: &'a Professional) -> StoreFuture<'a, ()>;

    /// Fetch every area.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the store cannot be queried.
    fn list_areas(&self) -> StoreFuture<'_, Vec<Area>>;

    /// Create or refresh an area keyed by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the write fails.
    fn put_area<'a>(&'a self, area: &'a Area) -> StoreFuture<'a, ()>;
}
