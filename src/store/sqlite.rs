//! [`RecordStore`] backed by the `SQLite` repositories.

use std::sync::Arc;

use crate::models::area::Area;
use crate::models::demand::{Demand, Person};
use crate::models::professional::{Professional, ProfessionalForm};
use crate::persistence::area_repo::AreaRepo;
use crate::persistence::db::Database;
use crate::persistence::demand_repo::DemandRepo;
use crate::persistence::professional_repo::ProfessionalRepo;

use super::{RecordStore, StoreFuture};

/// Production record store over a shared `SQLite` pool.
#[derive(Clone)]
pub struct SqliteStore {
    demands: DemandRepo,
    professionals: ProfessionalRepo,
    areas: AreaRepo,
}

impl SqliteStore {
    /// Build a store sharing `db` across all repositories.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            demands: DemandRepo::new(Arc::clone(&db)),
            professionals: ProfessionalRepo::new(Arc::clone(&db)),
            areas: AreaRepo::new(db),
        }
    }
}

impl RecordStore for SqliteStore {
    fn list_demands(&self) -> StoreFuture<'_, Vec<Demand>> {
        Box::pin(self.demands.list_all())
    }

    fn insert_demand<'a>(&'a self, demand: &'a Demand) -> StoreFuture<'a, ()> {
        Box::pin(self.demands.insert(demand))
    }

    fn update_demand_involved<'a>(
        &'a self,
        id: &'a str,
        involved: &'a [Person],
        editor: &'a str,
    ) -> StoreFuture<'a, ()> {
        Box::pin(self.demands.update_involved(id, involved, editor))
    }

    fn list_professionals(&self) -> StoreFuture<'_, Vec<Professional>> {
        Box::pin(self.professionals.list_all())
    }

    fn update_professional<'a>(
        &'a self,
        id: &'a str,
        form: &'a ProfessionalForm,
    ) -> StoreFuture<'a, ()> {
        Box::pin(self.professionals.update_profile(id, form))
    }

    fn create_professional<'a>(&'a self, professional: &'a Professional) -> StoreFuture<'a, ()> {
        Box::pin(self.professionals.insert(professional))
    }

    fn list_areas(&self) -> StoreFuture<'_, Vec<Area>> {
        Box::pin(self.areas.list_all())
    }

    fn put_area<'a>(&'a self, area: &'a Area) -> StoreFuture<'a, ()> {
        Box::pin(self.areas.upsert(area))
    }
}
