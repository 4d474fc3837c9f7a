//! Identity provider backed by the local `account` table.

use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::persistence::account_repo::{AccountRecord, AccountRepo};
use crate::persistence::db::Database;
use crate::{AppError, AuthFailure, Result};

use super::{AuthFuture, Identity, IdentityProvider};

const MIN_PASSWORD_LEN: usize = 6;

/// Salted SHA-256 credential store.
#[derive(Clone)]
pub struct LocalIdentityProvider {
    accounts: AccountRepo,
}

/// Loose syntactic email check: `local@domain.tld`, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl LocalIdentityProvider {
    /// Create a provider over the shared database.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            accounts: AccountRepo::new(db),
        }
    }

    /// Enable or disable sign-in for `email`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no account uses `email`.
    pub async fn set_disabled(&self, email: &str, disabled: bool) -> Result<()> {
        self.accounts
            .set_disabled(&email.trim().to_lowercase(), disabled)
            .await?;
        info!(%email, disabled, "account status changed");
        Ok(())
    }

    async fn verify(&self, email: &str, password: &str) -> Result<Identity> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::Auth(AuthFailure::InvalidEmail));
        }
        let account = self
            .accounts
            .find_by_email(&email)
            .await
            .map_err(|err| AppError::Auth(AuthFailure::Other(err.to_string())))?
            .ok_or(AppError::Auth(AuthFailure::UserNotFound))?;
        if account.disabled {
            return Err(AppError::Auth(AuthFailure::UserDisabled));
        }
        let computed = digest(&account.password_salt, password);
        if !bool::from(
            computed
                .as_bytes()
                .ct_eq(account.password_hash.as_bytes()),
        ) {
            warn!(%email, "sign-in rejected: wrong password");
            return Err(AppError::Auth(AuthFailure::WrongPassword));
        }
        Ok(Identity {
            uid: account.uid,
            email: account.email,
        })
    }

    async fn register(&self, uid: &str, email: &str, password: &str) -> Result<Identity> {
        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::Auth(AuthFailure::InvalidEmail));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "password must have at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AppError::Auth(AuthFailure::EmailAlreadyInUse));
        }

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let record = AccountRecord {
            uid: uid.to_owned(),
            password_hash: digest(&salt, password),
            password_salt: salt,
            email,
            disabled: false,
            created_at: Utc::now(),
        };
        self.accounts.insert(&record).await?;
        info!(uid = %record.uid, "account created");
        Ok(Identity {
            uid: record.uid,
            email: record.email,
        })
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn sign_in<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, Identity> {
        Box::pin(self.verify(email, password))
    }

    fn create_account<'a>(
        &'a self,
        uid: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Identity> {
        Box::pin(self.register(uid, email, password))
    }
}
