//! Normalized per-session cache of demands.

use std::collections::HashMap;

use crate::models::demand::{Demand, Person};
use crate::{AppError, Result};

/// Demands keyed by id, in the order the store returned them.
///
/// The detail view is a reference into this map rather than a second copy,
/// so a reconciled write is visible to the list and the detail view at once.
#[derive(Debug, Default)]
pub struct DemandBoard {
    records: HashMap<String, Demand>,
    order: Vec<String>,
    selected: Option<String>,
    loaded: bool,
}

impl DemandBoard {
    /// Replace the whole cache with a fresh load.
    ///
    /// The selection survives when its demand is still present. A repeated
    /// id keeps its first position and its last contents.
    pub fn replace_all(&mut self, demands: Vec<Demand>) {
        self.records.clear();
        self.order.clear();
        for demand in demands {
            if !self.records.contains_key(&demand.id) {
                self.order.push(demand.id.clone());
            }
            self.records.insert(demand.id.clone(), demand);
        }
        if let Some(id) = &self.selected {
            if !self.records.contains_key(id) {
                self.selected = None;
            }
        }
        self.loaded = true;
    }

    /// Whether the cache has been filled at least once.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of cached demands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no demands are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Demands in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Demand> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Look up a demand by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Demand> {
        self.records.get(id)
    }

    /// Point the detail view at `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if `id` is not cached.
    pub fn select(&mut self, id: &str) -> Result<&Demand> {
        let demand = self
            .records
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("demand {id}")))?;
        self.selected = Some(id.to_owned());
        Ok(demand)
    }

    /// The demand currently open in the detail view.
    #[must_use]
    pub fn selected(&self) -> Option<&Demand> {
        self.selected.as_deref().and_then(|id| self.records.get(id))
    }

    /// Close the detail view.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Overwrite only the `involved` field of one demand.
    ///
    /// Returns the updated demand, or `None` if `id` is not cached.
    pub fn replace_involved(&mut self, id: &str, involved: Vec<Person>) -> Option<&Demand> {
        let demand = self.records.get_mut(id)?;
        demand.involved = involved;
        Some(demand)
    }
}
