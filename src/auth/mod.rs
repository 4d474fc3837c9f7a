//! Sign-in, session context and the route guard.
//!
//! Credentials are checked by an [`IdentityProvider`]; the console's own
//! email allow-list is enforced by [`gate::AuthGate`] before the provider is
//! ever called.

pub mod gate;
pub mod local;

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::Result;

pub use gate::{AuthGate, SessionRegistry, SignedIn};
pub use local::LocalIdentityProvider;

/// Boxed future returned by [`IdentityProvider`] methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// A signed-in account.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Identity {
    /// Account identity.
    pub uid: String,
    /// Sign-in email.
    pub email: String,
}

/// Email/password credential authority.
pub trait IdentityProvider: Send + Sync {
    /// Verify credentials and return the account identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Auth`](crate::AppError::Auth) with the rejection reason.
    fn sign_in<'a>(&'a self, email: &'a str, password: &'a str) -> AuthFuture<'a, Identity>;

    /// Register a new account under `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Auth`](crate::AppError::Auth) if the email is invalid or
    /// already registered, or [`AppError::Validation`](crate::AppError::Validation)
    /// for a password that is too short.
    fn create_account<'a>(
        &'a self,
        uid: &'a str,
        email: &'a str,
        password: &'a str,
    ) -> AuthFuture<'a, Identity>;
}

/// Session state handed to anything that must know who is signed in.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SessionContext {
    /// The signed-in identity, if any.
    pub session: Option<Identity>,
    /// Session state is still being resolved.
    pub is_loading: bool,
}

impl SessionContext {
    /// Context for a resolved, signed-in session.
    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            session: Some(identity),
            is_loading: false,
        }
    }

    /// Context with no session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Outcome of guarding a protected page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the page for this identity.
    Allow(Identity),
    /// Show the loading placeholder.
    Loading,
    /// Send the user to `/login`, remembering where they were going.
    RedirectToLogin {
        /// Path originally requested.
        from: String,
    },
}

/// Decide what a protected route shows for `ctx`.
#[must_use]
pub fn guard(ctx: &SessionContext, from: &str) -> RouteDecision {
    if ctx.is_loading {
        return RouteDecision::Loading;
    }
    match &ctx.session {
        Some(identity) => RouteDecision::Allow(identity.clone()),
        None => RouteDecision::RedirectToLogin { from: from.into() },
    }
}

/// Where to send a user after sign-in: the page they came from, or `/`.
#[must_use]
pub fn post_login_destination(from: Option<&str>) -> String {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && path != "/login" => {
            path.to_owned()
        }
        _ => "/".to_owned(),
    }
}
