//! Demand model and status labels.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow status of a demand.
///
/// A closed label set read from the store's integer code. Codes outside
/// `0..=3`, and a missing code, map to [`DemandStatus::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandStatus {
    /// Waiting in the queue (`0`).
    Queued,
    /// Being worked on (`1`).
    InProgress,
    /// Finished by the assigned people (`2`).
    Completed,
    /// Finished and approved (`3`).
    Approved,
    /// Any other stored value, kept for round-tripping.
    Unknown(Option<i64>),
}

impl DemandStatus {
    /// Map a stored status code to its label.
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Queued,
            Some(1) => Self::InProgress,
            Some(2) => Self::Completed,
            Some(3) => Self::Approved,
            other => Self::Unknown(other),
        }
    }

    /// Stored code for this status.
    #[must_use]
    pub fn code(self) -> Option<i64> {
        match self {
            Self::Queued => Some(0),
            Self::InProgress => Some(1),
            Self::Completed => Some(2),
            Self::Approved => Some(3),
            Self::Unknown(code) => code,
        }
    }

    /// Label shown in the console.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Queued => "Na fila",
            Self::InProgress => "Em progresso",
            Self::Completed => "Finalizada",
            Self::Approved => "Aprovada",
            Self::Unknown(_) => "Desconhecido",
        }
    }
}

impl Display for DemandStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Queued => "Queued",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Approved => "Approved",
            Self::Unknown(_) => "Unknown",
        })
    }
}

impl Serialize for DemandStatus {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        self.code().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DemandStatus {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        Option::<i64>::deserialize(deserializer).map(Self::from_code)
    }
}

/// A person assigned to a demand.
///
/// Snapshot of a professional taken at assignment time; it is not
/// refreshed when the professional's record changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Person {
    /// Identity of the professional.
    pub uid: String,
    /// Display name at assignment time.
    pub name: String,
}

/// The user who submitted the demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Requester {
    /// Identity of the requester, when recorded.
    #[serde(default)]
    pub uid: Option<String>,
    /// Display name of the requester.
    pub name: String,
}

/// A work request awaiting or undergoing assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Demand {
    /// Store-assigned record identifier.
    pub id: String,
    /// Short title.
    pub subject: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Workflow status.
    pub status: DemandStatus,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Area labels the request needs.
    #[serde(default)]
    pub needs: Vec<String>,
    /// People currently assigned, without duplicate `uid`s.
    #[serde(default)]
    pub involved: Vec<Person>,
    /// Result URLs, present once the demand is finalized.
    #[serde(default)]
    pub links: Vec<String>,
    /// Marker of the last editor.
    #[serde(default)]
    pub edited_by: Option<String>,
    /// Submitter snapshot (the store's `user` field).
    #[serde(default, rename = "user")]
    pub requester: Option<Requester>,
}

impl Demand {
    /// Construct a queued demand with a generated identifier.
    #[must_use]
    pub fn new(subject: impl Into<String>, needs: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subject: subject.into(),
            description: String::new(),
            status: DemandStatus::Queued,
            created_at: Some(Utc::now()),
            needs,
            involved: Vec::new(),
            links: Vec::new(),
            edited_by: None,
            requester: None,
        }
    }

    /// Whether a person with `uid` is already assigned.
    #[must_use]
    pub fn has_person(&self, uid: &str) -> bool {
        self.involved.iter().any(|person| person.uid == uid)
    }
}
