//! Professional (staff account) model and its editing forms.

use serde::{Deserialize, Serialize};

use super::demand::Person;
use crate::{AppError, Result};

/// Account type of a professional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfessionalKind {
    /// Regular professional (`2`).
    #[default]
    Professional,
    /// Manager (`3`).
    Manager,
}

impl ProfessionalKind {
    /// Map a stored type code; unknown codes read as `Professional`.
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(3) => Self::Manager,
            _ => Self::Professional,
        }
    }

    /// Stored type code.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Professional => 2,
            Self::Manager => 3,
        }
    }
}

impl Serialize for ProfessionalKind {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ProfessionalKind {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        Option::<i64>::deserialize(deserializer).map(Self::from_code)
    }
}

/// A staff account usable as an assignee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    /// Record identifier, shared with the identity-provider account.
    pub id: String,
    /// Sign-in email.
    #[serde(default)]
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Contact number.
    #[serde(default)]
    pub whatsapp: String,
    /// Single area label; empty means not assignable.
    #[serde(default)]
    pub area: String,
    /// Birth date as entered.
    #[serde(default)]
    pub birth_day: String,
    /// Gender as entered.
    #[serde(default)]
    pub gender: String,
    /// Account type.
    #[serde(default, rename = "type")]
    pub kind: ProfessionalKind,
    /// Manager name.
    #[serde(default)]
    pub manager: String,
    /// Manager email.
    #[serde(default)]
    pub manager_email: String,
    /// Manager contact number.
    #[serde(default)]
    pub manager_whatsapp: String,
    /// Account was created through the identity provider.
    #[serde(default)]
    pub data_auth: bool,
    /// Terms were accepted.
    #[serde(default)]
    pub terms: bool,
}

impl Professional {
    /// Whether this account may be assigned to demands.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        !self.area.trim().is_empty()
    }

    /// Snapshot used in a demand's `involved` list.
    #[must_use]
    pub fn as_person(&self) -> Person {
        Person {
            uid: self.id.clone(),
            name: self.full_name.clone(),
        }
    }

    /// Overwrite the editable fields with `form`.
    pub fn apply(&mut self, form: &ProfessionalForm) {
        self.full_name.clone_from(&form.full_name);
        self.whatsapp.clone_from(&form.whatsapp);
        self.area.clone_from(&form.area);
        self.birth_day.clone_from(&form.birth_day);
        self.gender.clone_from(&form.gender);
        self.kind = form.kind;
        self.manager.clone_from(&form.manager);
        self.manager_email.clone_from(&form.manager_email);
        self.manager_whatsapp.clone_from(&form.manager_whatsapp);
    }
}

/// Editable profile fields of a professional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalForm {
    /// Display name.
    pub full_name: String,
    /// Contact number.
    #[serde(default)]
    pub whatsapp: String,
    /// Area label.
    pub area: String,
    /// Birth date as entered.
    #[serde(default)]
    pub birth_day: String,
    /// Gender as entered.
    #[serde(default)]
    pub gender: String,
    /// Account type.
    #[serde(default, rename = "type")]
    pub kind: ProfessionalKind,
    /// Manager name.
    #[serde(default)]
    pub manager: String,
    /// Manager email.
    #[serde(default)]
    pub manager_email: String,
    /// Manager contact number.
    #[serde(default)]
    pub manager_whatsapp: String,
}

impl ProfessionalForm {
    /// Trim every field and check the required ones.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the name or area is empty.
    pub fn normalized(&self) -> Result<Self> {
        let form = Self {
            full_name: self.full_name.trim().to_owned(),
            whatsapp: self.whatsapp.trim().to_owned(),
            area: self.area.trim().to_owned(),
            birth_day: self.birth_day.trim().to_owned(),
            gender: self.gender.trim().to_owned(),
            kind: self.kind,
            manager: self.manager.trim().to_owned(),
            manager_email: self.manager_email.trim().to_owned(),
            manager_whatsapp: self.manager_whatsapp.trim().to_owned(),
        };
        if form.full_name.is_empty() {
            return Err(AppError::Validation("fullName is required".into()));
        }
        if form.area.is_empty() {
            return Err(AppError::Validation("area is required".into()));
        }
        Ok(form)
    }
}

/// Sign-up form for a new professional account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfessional {
    /// Sign-in email.
    pub email: String,
    /// Initial password; never stored on the professional record.
    pub password: String,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: ProfessionalForm,
}

impl NewProfessional {
    /// Build the store record for this sign-up under `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the profile is incomplete.
    pub fn into_record(self, id: String) -> Result<Professional> {
        let profile = self.profile.normalized()?;
        let mut record = Professional {
            id,
            email: self.email.trim().to_owned(),
            full_name: String::new(),
            whatsapp: String::new(),
            area: String::new(),
            birth_day: String::new(),
            gender: String::new(),
            kind: ProfessionalKind::default(),
            manager: String::new(),
            manager_email: String::new(),
            manager_whatsapp: String::new(),
            data_auth: true,
            terms: true,
        };
        record.apply(&profile);
        Ok(record)
    }
}
