//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Reason an identity-provider call was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Email address is syntactically invalid.
    InvalidEmail,
    /// Account exists but has been disabled.
    UserDisabled,
    /// No account is registered for the email.
    UserNotFound,
    /// Password does not match the stored credential.
    WrongPassword,
    /// Account creation attempted for an email that is already registered.
    EmailAlreadyInUse,
    /// Any other provider failure.
    Other(String),
}

impl AuthFailure {
    /// Stable machine-readable code for the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::UserDisabled => "user_disabled",
            Self::UserNotFound => "user_not_found",
            Self::WrongPassword => "wrong_password",
            Self::EmailAlreadyInUse => "email_already_in_use",
            Self::Other(_) => "other",
        }
    }
}

impl Display for AuthFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(msg) => write!(f, "other: {msg}"),
            other => f.write_str(other.code()),
        }
    }
}

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Persistence failure when interacting with `SQLite`.
    Db(String),
    /// Requested entity does not exist.
    NotFound(String),
    /// Candidate is already present in the demand's `involved` list.
    DuplicateAssignment(String),
    /// Removal attempted on a demand with no assigned people.
    EmptyAssignment(String),
    /// The record store rejected or failed a write.
    RemoteWrite(String),
    /// Identity provider rejected a sign-in or account creation.
    Auth(AuthFailure),
    /// Email is not on the console allow-list.
    Unauthorized(String),
    /// Request carries no valid session.
    Unauthenticated(String),
    /// Another assignment change is still being written for this session.
    MutationInFlight(String),
    /// Submitted form data failed validation.
    Validation(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl AppError {
    /// Human-readable notice shown to the console operator.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Auth(AuthFailure::InvalidEmail) => "Email inválido.".into(),
            Self::Auth(AuthFailure::UserDisabled) => "Esta conta foi desativada.".into(),
            Self::Auth(AuthFailure::UserNotFound) => "Usuário não encontrado.".into(),
            Self::Auth(AuthFailure::WrongPassword) => "Senha incorreta.".into(),
            Self::Auth(AuthFailure::EmailAlreadyInUse) => "Este email já está em uso.".into(),
            Self::Auth(AuthFailure::Other(_)) => "Erro ao fazer login. Tente novamente.".into(),
            Self::Unauthorized(_) => "Você não tem permissão para acessar este painel.".into(),
            Self::Unauthenticated(_) => "Sessão expirada. Faça login novamente.".into(),
            Self::DuplicateAssignment(_) => {
                "Este profissional já está atribuído a esta demanda.".into()
            }
            Self::EmptyAssignment(_) => "Esta demanda não possui profissionais atribuídos.".into(),
            Self::NotFound(what) => format!("Registro não encontrado: {what}."),
            Self::RemoteWrite(_) => "Erro ao salvar alterações. Tente novamente.".into(),
            Self::MutationInFlight(_) => {
                "Aguarde a conclusão da alteração anterior.".into()
            }
            Self::Validation(msg) => format!("Dados inválidos: {msg}."),
            Self::Config(_) | Self::Db(_) | Self::Io(_) => {
                "Erro interno. Tente novamente mais tarde.".into()
            }
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Db(msg) => write!(f, "db: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::DuplicateAssignment(msg) => write!(f, "duplicate assignment: {msg}"),
            Self::EmptyAssignment(msg) => write!(f, "empty assignment: {msg}"),
            Self::RemoteWrite(msg) => write!(f, "remote write: {msg}"),
            Self::Auth(reason) => write!(f, "auth: {reason}"),
            Self::Unauthorized(msg) => write!(f, "unauthorized: {msg}"),
            Self::Unauthenticated(msg) => write!(f, "unauthenticated: {msg}"),
            Self::MutationInFlight(msg) => write!(f, "mutation in flight: {msg}"),
            Self::Validation(msg) => write!(f, "validation: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Db(format!("json column: {err}"))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
