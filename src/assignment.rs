//! Add/remove people on a demand's `involved` list.
//!
//! Planning is pure: [`plan_add`] and [`plan_remove`] compute the next list
//! or reject the edit. [`AssignmentMutator`] then writes the planned list to
//! the record store; callers reconcile their local copy only after the
//! write returns `Ok`.

use std::sync::Arc;

use tracing::{info, warn};

use crate::models::demand::{Demand, Person};
use crate::models::professional::Professional;
use crate::store::RecordStore;
use crate::{AppError, Result};

/// Compute `involved` after appending `candidate`.
///
/// # Errors
///
/// Returns `AppError::DuplicateAssignment` if the candidate is already assigned.
pub fn plan_add(demand: &Demand, candidate: &Professional) -> Result<Vec<Person>> {
    if demand.has_person(&candidate.id) {
        return Err(AppError::DuplicateAssignment(format!(
            "{} already assigned to demand {}",
            candidate.id, demand.id
        )));
    }
    let mut next = demand.involved.clone();
    next.push(candidate.as_person());
    Ok(next)
}

/// Compute `involved` after dropping every entry for `uid`.
///
/// Removing a `uid` that is not assigned yields an unchanged list.
///
/// # Errors
///
/// Returns `AppError::EmptyAssignment` if nobody is assigned.
pub fn plan_remove(demand: &Demand, uid: &str) -> Result<Vec<Person>> {
    if demand.involved.is_empty() {
        return Err(AppError::EmptyAssignment(format!(
            "demand {} has no assigned people",
            demand.id
        )));
    }
    Ok(demand
        .involved
        .iter()
        .filter(|person| person.uid != uid)
        .cloned()
        .collect())
}

/// Writes planned `involved` lists to the record store.
#[derive(Clone)]
pub struct AssignmentMutator {
    store: Arc<dyn RecordStore>,
    editor: String,
}

impl AssignmentMutator {
    /// Create a mutator stamping `editor` into `editedBy` on every write.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, editor: impl Into<String>) -> Self {
        Self {
            store,
            editor: editor.into(),
        }
    }

    /// Marker written to `editedBy`.
    #[must_use]
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Assign `candidate` to `demand`, returning the written list.
    ///
    /// `demand` is not modified.
    ///
    /// # Errors
    ///
    /// Returns `AppError::DuplicateAssignment` without writing if the
    /// candidate is already assigned, or `AppError::RemoteWrite` if the
    /// store write fails.
    pub async fn add_person(&self, demand: &Demand, candidate: &Professional) -> Result<Vec<Person>> {
        let next = plan_add(demand, candidate)?;
        self.write(&demand.id, &next).await?;
        info!(demand_id = %demand.id, uid = %candidate.id, "person assigned");
        Ok(next)
    }

    /// Unassign `uid` from `demand`, returning the written list.
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmptyAssignment` without writing if nobody is
    /// assigned, or `AppError::RemoteWrite` if the store write fails.
    pub async fn remove_person(&self, demand: &Demand, uid: &str) -> Result<Vec<Person>> {
        let next = plan_remove(demand, uid)?;
        self.write(&demand.id, &next).await?;
        info!(demand_id = %demand.id, %uid, "person unassigned");
        Ok(next)
    }

    async fn write(&self, demand_id: &str, involved: &[Person]) -> Result<()> {
        self.store
            .update_demand_involved(demand_id, involved, &self.editor)
            .await
            .map_err(|err| {
                warn!(%demand_id, %err, "involved write failed");
                AppError::RemoteWrite(err.to_string())
            })
    }
}
