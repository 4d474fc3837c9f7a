//! Route guard middleware for protected console routes.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::{guard, Identity, RouteDecision, SessionContext};
use crate::console::Console;

use super::AppState;

/// Session attached to a request that passed the guard.
#[derive(Clone)]
pub struct ConsoleSession {
    /// Bearer token of the session.
    pub token: String,
    /// Signed-in account.
    pub identity: Identity,
    /// The session's console.
    pub console: Arc<Console>,
}

#[derive(Serialize)]
struct LoginRedirect {
    ok: bool,
    error: &'static str,
    code: &'static str,
    redirect_to: &'static str,
    from: String,
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Reject requests without a live session; attach [`ConsoleSession`] otherwise.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let from = request.uri().path().to_owned();
    let token = bearer_token(request.headers()).map(str::to_owned);

    let resolved = match &token {
        Some(token) => state.gate.sessions().resolve(token).await,
        None => None,
    };
    let ctx = match &resolved {
        Some((identity, _)) => SessionContext::signed_in(identity.clone()),
        None => SessionContext::signed_out(),
    };

    match guard(&ctx, &from) {
        RouteDecision::Allow(identity) => match (token, resolved) {
            (Some(token), Some((_, console))) => {
                request.extensions_mut().insert(ConsoleSession {
                    token,
                    identity,
                    console,
                });
                next.run(request).await
            }
            _ => login_redirect(from),
        },
        RouteDecision::Loading => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "ok": false, "error": "Carregando..." })),
        )
            .into_response(),
        RouteDecision::RedirectToLogin { from } => login_redirect(from),
    }
}

fn login_redirect(from: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(LoginRedirect {
            ok: false,
            error: "Sessão expirada. Faça login novamente.",
            code: "unauthenticated",
            redirect_to: "/login",
            from,
        }),
    )
        .into_response()
}
