//! Per-session console state and operations.
//!
//! A [`Console`] is opened for every signed-in session and dropped on
//! sign-out. It caches the demand list and the professional roster, and
//! routes every change through the record store before touching the cache.

pub mod board;

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, info_span, warn, Instrument};

use crate::assignment::AssignmentMutator;
use crate::auth::IdentityProvider;
use crate::catalog::{build_area_index, filter_demands, AreaFilter};
use crate::models::area::{Area, AreaSeed};
use crate::models::demand::{Demand, Person};
use crate::models::professional::{NewProfessional, Professional, ProfessionalForm};
use crate::store::RecordStore;
use crate::{AppError, Result};

pub use board::DemandBoard;

#[derive(Debug, Default)]
struct Roster {
    professionals: Vec<Professional>,
    loaded: bool,
}

/// One operator's working copy of the console.
pub struct Console {
    store: Arc<dyn RecordStore>,
    identity: Arc<dyn IdentityProvider>,
    mutator: AssignmentMutator,
    board: Mutex<DemandBoard>,
    roster: Mutex<Roster>,
    in_flight: Mutex<()>,
}

impl Console {
    /// Open an empty console; data loads lazily on first use.
    #[must_use]
    pub fn new(
        store: Arc<dyn RecordStore>,
        identity: Arc<dyn IdentityProvider>,
        editor: impl Into<String>,
    ) -> Self {
        Self {
            mutator: AssignmentMutator::new(Arc::clone(&store), editor),
            store,
            identity,
            board: Mutex::new(DemandBoard::default()),
            roster: Mutex::new(Roster::default()),
            in_flight: Mutex::new(()),
        }
    }

    // ── Demands ─────────────────────────────────────────

    /// Reload every demand from the store, returning how many were loaded.
    ///
    /// # Errors
    ///
    /// Returns the store error if the list cannot be fetched; the cache is
    /// left as it was.
    pub async fn refresh_demands(&self) -> Result<usize> {
        let demands = self.store.list_demands().await.map_err(|err| {
            error!(%err, "failed to load demands");
            err
        })?;
        let mut board = self.board.lock().await;
        board.replace_all(demands);
        info!(count = board.len(), "demands loaded");
        Ok(board.len())
    }

    async fn ensure_demands(&self) -> Result<()> {
        if !self.board.lock().await.is_loaded() {
            self.refresh_demands().await?;
        }
        Ok(())
    }

    /// Demands matching `area` and `term`, in load order.
    ///
    /// # Errors
    ///
    /// Returns the store error if the first load fails.
    pub async fn visible_demands(&self, area: &AreaFilter, term: &str) -> Result<Vec<Demand>> {
        self.ensure_demands().await?;
        let board = self.board.lock().await;
        Ok(filter_demands(board.iter(), area, term)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Distinct area labels across the cached demands, sorted for display.
    ///
    /// # Errors
    ///
    /// Returns the store error if the first load fails.
    pub async fn area_options(&self) -> Result<Vec<String>> {
        self.ensure_demands().await?;
        let board = self.board.lock().await;
        let mut areas: Vec<String> = build_area_index(board.iter()).into_iter().collect();
        areas.sort();
        Ok(areas)
    }

    /// Open `id` in the detail view.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the demand is not in the cache.
    pub async fn open_demand(&self, id: &str) -> Result<Demand> {
        self.ensure_demands().await?;
        let mut board = self.board.lock().await;
        board.select(id).cloned()
    }

    /// The demand open in the detail view, if any.
    pub async fn selected_demand(&self) -> Option<Demand> {
        self.board.lock().await.selected().cloned()
    }

    /// Close the detail view.
    pub async fn close_demand(&self) {
        self.board.lock().await.clear_selection();
    }

    async fn cached_demand(&self, id: &str) -> Result<Demand> {
        self.ensure_demands().await?;
        self.board
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("demand {id}")))
    }

    fn begin_mutation(&self) -> Result<MutexGuard<'_, ()>> {
        self.in_flight.try_lock().map_err(|_| {
            AppError::MutationInFlight("an assignment change is still being saved".into())
        })
    }

    /// Apply a store-confirmed involved list to the cache.
    ///
    /// A refresh may have dropped the demand while the write was in flight;
    /// the confirmed snapshot is returned either way.
    async fn reconcile(&self, mut demand: Demand, involved: Vec<Person>) -> Demand {
        if let Some(cached) = self
            .board
            .lock()
            .await
            .replace_involved(&demand.id, involved.clone())
        {
            return cached.clone();
        }
        warn!(demand_id = %demand.id, "saved assignment for a demand no longer cached");
        demand.involved = involved;
        demand
    }

    /// Assign the professional `candidate_id` to demand `demand_id`.
    ///
    /// The cache changes only after the store accepts the write.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MutationInFlight` while another change is being
    /// saved, `AppError::NotFound` for an unknown demand or candidate,
    /// `AppError::DuplicateAssignment` if already assigned, or
    /// `AppError::RemoteWrite` if the store write fails.
    pub async fn add_person(&self, demand_id: &str, candidate_id: &str) -> Result<Demand> {
        let _guard = self.begin_mutation()?;
        async {
            let demand = self.cached_demand(demand_id).await?;
            let candidate = self.resolve_candidate(candidate_id).await?;
            let involved = self.mutator.add_person(&demand, &candidate).await?;
            Ok(self.reconcile(demand, involved).await)
        }
        .instrument(info_span!("add_person", %demand_id, %candidate_id))
        .await
    }

    /// Unassign `uid` from demand `demand_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MutationInFlight` while another change is being
    /// saved, `AppError::NotFound` for an unknown demand,
    /// `AppError::EmptyAssignment` if nobody is assigned, or
    /// `AppError::RemoteWrite` if the store write fails.
    pub async fn remove_person(&self, demand_id: &str, uid: &str) -> Result<Demand> {
        let _guard = self.begin_mutation()?;
        async {
            let demand = self.cached_demand(demand_id).await?;
            let involved = self.mutator.remove_person(&demand, uid).await?;
            Ok(self.reconcile(demand, involved).await)
        }
        .instrument(info_span!("remove_person", %demand_id, %uid))
        .await
    }

    // ── Professionals ───────────────────────────────────

    /// Reload the professional roster, returning how many were loaded.
    ///
    /// # Errors
    ///
    /// Returns the store error if the roster cannot be fetched.
    pub async fn refresh_professionals(&self) -> Result<usize> {
        let professionals = self.store.list_professionals().await?;
        let mut roster = self.roster.lock().await;
        roster.professionals = professionals;
        roster.loaded = true;
        Ok(roster.professionals.len())
    }

    async fn ensure_roster(&self) -> Result<()> {
        if !self.roster.lock().await.loaded {
            self.refresh_professionals().await?;
        }
        Ok(())
    }

    /// Professionals eligible for assignment, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns the store error if the first load fails.
    pub async fn candidates(&self) -> Result<Vec<Professional>> {
        self.ensure_roster().await?;
        let roster = self.roster.lock().await;
        let mut candidates: Vec<Professional> = roster
            .professionals
            .iter()
            .filter(|p| p.is_assignable())
            .cloned()
            .collect();
        candidates.sort_by(|a, b| {
            a.full_name
                .to_lowercase()
                .cmp(&b.full_name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(candidates)
    }

    async fn resolve_candidate(&self, id: &str) -> Result<Professional> {
        self.ensure_roster().await?;
        self.roster
            .lock()
            .await
            .professionals
            .iter()
            .find(|p| p.id == id && p.is_assignable())
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("professional {id}")))
    }

    /// Save a professional's profile and refresh the roster copy.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an incomplete form,
    /// `AppError::NotFound` for an unknown id, or `AppError::RemoteWrite`
    /// if the store write fails.
    pub async fn update_professional(
        &self,
        id: &str,
        form: &ProfessionalForm,
    ) -> Result<Professional> {
        let form = form.normalized()?;
        self.ensure_roster().await?;
        self.store
            .update_professional(id, &form)
            .await
            .map_err(|err| match err {
                AppError::NotFound(_) => err,
                other => AppError::RemoteWrite(other.to_string()),
            })?;

        let mut roster = self.roster.lock().await;
        if let Some(entry) = roster.professionals.iter_mut().find(|p| p.id == id) {
            entry.apply(&form);
            info!(professional_id = %id, "professional updated");
            return Ok(entry.clone());
        }
        drop(roster);

        self.refresh_professionals().await?;
        self.roster
            .lock()
            .await
            .professionals
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("professional {id}")))
    }

    /// Create a sign-in account and its professional record under one id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an incomplete form, `AppError::Auth`
    /// if the identity provider refuses the account, or
    /// `AppError::RemoteWrite` if the record cannot be stored.
    pub async fn create_professional(&self, request: NewProfessional) -> Result<Professional> {
        let id = uuid::Uuid::new_v4().to_string();
        let email = request.email.clone();
        let password = request.password.clone();
        let record = request.into_record(id.clone())?;

        self.identity.create_account(&id, &email, &password).await?;
        if let Err(err) = self.store.create_professional(&record).await {
            error!(professional_id = %id, %err, "account created but professional record was not stored");
            return Err(AppError::RemoteWrite(err.to_string()));
        }

        let mut roster = self.roster.lock().await;
        if roster.loaded {
            roster.professionals.push(record.clone());
        }
        info!(professional_id = %id, area = %record.area, "professional created");
        Ok(record)
    }

    // ── Areas ───────────────────────────────────────────

    /// Active areas sorted by display name.
    ///
    /// # Errors
    ///
    /// Returns the store error if areas cannot be fetched.
    pub async fn active_areas(&self) -> Result<Vec<Area>> {
        let mut areas: Vec<Area> = self
            .store
            .list_areas()
            .await?
            .into_iter()
            .filter(|area| area.active)
            .collect();
        areas.sort_by_key(|area| area.display_name.to_lowercase());
        Ok(areas)
    }

    /// Create or reactivate every seed area, returning how many were written.
    ///
    /// # Errors
    ///
    /// Returns `AppError::RemoteWrite` on the first failed write; areas
    /// written before it stay written.
    pub async fn initialize_areas(&self, seeds: &[AreaSeed]) -> Result<usize> {
        let now = Utc::now();
        for seed in seeds {
            let area = Area::from_seed(seed, now);
            self.store
                .put_area(&area)
                .await
                .map_err(|err| AppError::RemoteWrite(err.to_string()))?;
        }
        info!(count = seeds.len(), "areas initialized");
        Ok(seeds.len())
    }
}
