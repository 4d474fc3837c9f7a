//! HTTP surface of the console.
//!
//! `/health`, `/login` and `/session` are public; every other route sits
//! behind [`guard::require_session`] and runs against the caller's own
//! [`Console`](crate::console::Console).

pub mod guard;
pub mod handlers;
pub mod response;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::auth::AuthGate;
use crate::config::GlobalConfig;
use crate::{AppError, Result};

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Global configuration.
    pub config: Arc<GlobalConfig>,
    /// Sign-in gate and session registry.
    pub gate: AuthGate,
}

/// Handler for `GET /health`.
async fn health() -> &'static str {
    "ok"
}

/// Build the console router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route("/logout", post(handlers::auth::logout))
        .route("/demands", get(handlers::demands::list))
        .route("/demands/areas", get(handlers::demands::area_options))
        .route(
            "/demands/selected",
            get(handlers::demands::selected).delete(handlers::demands::close),
        )
        .route("/demands/{id}", get(handlers::demands::open))
        .route("/demands/{id}/involved", post(handlers::demands::add_person))
        .route(
            "/demands/{id}/involved/{uid}",
            delete(handlers::demands::remove_person),
        )
        .route(
            "/professionals",
            get(handlers::professionals::candidates).post(handlers::professionals::create),
        )
        .route("/professionals/{id}", put(handlers::professionals::update))
        .route("/areas", get(handlers::areas::list))
        .route("/areas/initialize", post(handlers::areas::initialize))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            guard::require_session,
        ));

    Router::new()
        .route("/health", get(health))
        .route("/login", post(handlers::auth::login))
        .route("/session", get(handlers::auth::session))
        .merge(protected)
        .with_state(state)
}

/// Serve the console on an already-bound listener until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Io` if the server fails.
pub async fn serve_on(listener: TcpListener, state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let router = build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Io(format!("http server error: {err}")))?;
    info!("HTTP console shut down");
    Ok(())
}

/// Bind `bind_host:http_port` and serve the console until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Config` if the address is invalid or cannot be bound.
pub async fn serve_http(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let bind: SocketAddr = format!("{}:{}", state.config.bind_host, state.config.http_port)
        .parse()
        .map_err(|err| AppError::Config(format!("invalid bind address: {err}")))?;
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind HTTP on {bind}: {err}")))?;
    info!(%bind, "starting HTTP console");
    serve_on(listener, state, ct).await
}
