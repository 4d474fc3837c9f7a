//! Reference work areas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name and display label used to create an area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AreaSeed {
    /// Area label stored on demands and professionals.
    pub name: String,
    /// Human-facing label.
    pub display_name: String,
}

/// A work area record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    /// Area label, also the record key.
    pub name: String,
    /// Human-facing label.
    pub display_name: String,
    /// Inactive areas are hidden from forms.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Area {
    /// Build an active area from a seed, stamped with `now`.
    #[must_use]
    pub fn from_seed(seed: &AreaSeed, now: DateTime<Utc>) -> Self {
        Self {
            name: seed.name.clone(),
            display_name: seed.display_name.clone(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
