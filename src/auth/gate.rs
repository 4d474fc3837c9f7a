//! Allow-listed sign-in and the per-token session registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::GlobalConfig;
use crate::console::Console;
use crate::store::RecordStore;
use crate::Result;

use super::{Identity, IdentityProvider, SessionContext};

const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);
const DEFAULT_MAX_IDLE: Duration = Duration::from_secs(8 * 3600);

struct SessionEntry {
    identity: Identity,
    console: Arc<Console>,
    last_seen: Instant,
}

/// Live console sessions keyed by bearer token.
///
/// An entry unused for `max_idle` is expired: lookups reject it and the
/// sweeper removes it.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<String, SessionEntry>>>,
    max_idle: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

impl SessionRegistry {
    /// Create an empty registry expiring sessions after `max_idle`.
    #[must_use]
    pub fn new(max_idle: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            max_idle,
        }
    }

    /// Inactivity after which a session expires.
    #[must_use]
    pub fn max_idle(&self) -> Duration {
        self.max_idle
    }

    /// Register a session under `token`.
    pub async fn insert(&self, token: String, identity: Identity, console: Arc<Console>) {
        self.inner.lock().await.insert(
            token,
            SessionEntry {
                identity,
                console,
                last_seen: Instant::now(),
            },
        );
    }

    /// Look up a session and mark it as recently used.
    ///
    /// An expired session is dropped and reported as absent.
    pub async fn resolve(&self, token: &str) -> Option<(Identity, Arc<Console>)> {
        let mut sessions = self.inner.lock().await;
        let entry = sessions.get_mut(token)?;
        if entry.last_seen.elapsed() >= self.max_idle {
            sessions.remove(token);
            info!("expired console session dropped");
            return None;
        }
        entry.last_seen = Instant::now();
        Some((entry.identity.clone(), Arc::clone(&entry.console)))
    }

    /// Drop a session and its console. Returns whether it existed.
    pub async fn remove(&self, token: &str) -> bool {
        self.inner.lock().await.remove(token).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Whether no sessions are live.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Drop sessions unused for at least `max_idle`, returning how many.
    pub async fn purge_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.inner.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < max_idle);
        before - sessions.len()
    }

    /// Spawn the idle-session sweeper.
    ///
    /// Runs every `max_idle`, at most hourly, until `cancel` fires.
    #[must_use]
    pub fn spawn_sweeper(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let registry = self.clone();
        let max_idle = self.max_idle;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(max_idle.min(SWEEP_INTERVAL));
            loop {
                tokio::select! {
                    () = cancel.cancelled() => {
                        info!("session sweeper shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let purged = registry.purge_idle(max_idle).await;
                        if purged > 0 {
                            info!(purged, "idle sessions dropped");
                        }
                    }
                }
            }
        })
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Signed-in account.
    pub identity: Identity,
}

/// Front door of the console: allow-list, credentials, session lifecycle.
#[derive(Clone)]
pub struct AuthGate {
    config: Arc<GlobalConfig>,
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn RecordStore>,
    sessions: SessionRegistry,
}

impl AuthGate {
    /// Create a gate with an empty session registry.
    #[must_use]
    pub fn new(
        config: Arc<GlobalConfig>,
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            identity,
            store,
            sessions: SessionRegistry::new(Duration::from_secs(config.session_idle_seconds)),
            config,
        }
    }

    /// The registry of live sessions.
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Sign in and open a console for the new session.
    ///
    /// The allow-list is checked before the identity provider is called.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` for an email outside the allow-list,
    /// or `AppError::Auth` with the provider's rejection reason.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn> {
        let email = email.trim();
        if let Err(err) = self.config.ensure_authorized(email) {
            warn!(%email, "sign-in refused: email not on allow-list");
            return Err(err);
        }

        let identity = self.identity.sign_in(email, password).await?;
        let console = Arc::new(Console::new(
            Arc::clone(&self.store),
            Arc::clone(&self.identity),
            self.config.editor_marker.clone(),
        ));
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions
            .insert(token.clone(), identity.clone(), console)
            .await;
        info!(uid = %identity.uid, "console session opened");
        Ok(SignedIn { token, identity })
    }

    /// End the session for `token`, discarding its console.
    pub async fn sign_out(&self, token: &str) -> bool {
        let removed = self.sessions.remove(token).await;
        if removed {
            info!("console session closed");
        }
        removed
    }

    /// Session context for an optional bearer token.
    pub async fn context(&self, token: Option<&str>) -> SessionContext {
        match token {
            Some(token) => match self.sessions.resolve(token).await {
                Some((identity, _)) => SessionContext::signed_in(identity),
                None => SessionContext::signed_out(),
            },
            None => SessionContext::signed_out(),
        }
    }
}
