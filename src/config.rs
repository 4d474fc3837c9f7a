//! Global configuration parsing and validation.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::area::AreaSeed;
use crate::{AppError, Result};

fn default_bind_host() -> String {
    "127.0.0.1".into()
}

fn default_http_port() -> u16 {
    8080
}

fn default_editor_marker() -> String {
    "Admin".into()
}

fn default_session_idle_seconds() -> u64 {
    8 * 3600
}

fn default_seed_areas() -> Vec<AreaSeed> {
    [
        ("social media", "Social Media"),
        ("audiovisual", "Audiovisual"),
        ("imprensa", "Imprensa"),
        ("design", "Design"),
        ("marketing", "Marketing"),
        ("bigdata", "Big Data"),
        ("dev", "Desenvolvimento"),
        ("admin", "Administração"),
    ]
    .into_iter()
    .map(|(name, display_name)| AreaSeed {
        name: name.into(),
        display_name: display_name.into(),
    })
    .collect()
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// `SQLite` database file backing the record store.
    pub db_path: PathBuf,
    /// Interface the HTTP console binds to.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    /// HTTP port for the console API.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Email addresses allowed to sign in to the console.
    pub allowed_emails: Vec<String>,
    /// Marker written to `editedBy` on every assignment change.
    #[serde(default = "default_editor_marker")]
    pub editor_marker: String,
    /// Idle time after which a console session is dropped.
    #[serde(default = "default_session_idle_seconds")]
    pub session_idle_seconds: u64,
    /// Reference areas created by `POST /areas/initialize`.
    #[serde(default = "default_seed_areas")]
    pub seed_areas: Vec<AreaSeed>,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// Relative `db_path` values are resolved against the config file's
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        let mut config = Self::from_toml_str(&raw)?;
        if config.db_path.is_relative() {
            if let Some(dir) = path.parent() {
                config.db_path = dir.join(&config.db_path);
            }
        }
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate that an email is allowed to use the console.
    ///
    /// Comparison is exact apart from surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the email is not in the allow-list.
    pub fn ensure_authorized(&self, email: &str) -> Result<()> {
        let email = email.trim();
        if self
            .allowed_emails
            .iter()
            .any(|allowed| allowed == email)
        {
            Ok(())
        } else {
            Err(AppError::Unauthorized(format!("{email} is not allowed")))
        }
    }

    fn validate(&mut self) -> Result<()> {
        self.allowed_emails = self
            .allowed_emails
            .iter()
            .map(|email| email.trim().to_owned())
            .filter(|email| !email.is_empty())
            .collect();
        if self.allowed_emails.is_empty() {
            return Err(AppError::Config("allowed_emails must not be empty".into()));
        }

        if self.editor_marker.trim().is_empty() {
            return Err(AppError::Config("editor_marker must not be empty".into()));
        }

        if self.session_idle_seconds == 0 {
            return Err(AppError::Config(
                "session_idle_seconds must be greater than zero".into(),
            ));
        }

        let mut seen = HashSet::new();
        for seed in &self.seed_areas {
            if seed.name.trim().is_empty() {
                return Err(AppError::Config("seed area name must not be empty".into()));
            }
            if !seen.insert(seed.name.as_str()) {
                return Err(AppError::Config(format!(
                    "duplicate seed area: {}",
                    seed.name
                )));
            }
        }

        Ok(())
    }
}
