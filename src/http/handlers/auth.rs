//! Sign-in, sign-out and session context.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{post_login_destination, Identity, SessionContext};
use crate::http::guard::{bearer_token, ConsoleSession};
use crate::http::response::{ok, ApiResponse};
use crate::http::AppState;
use crate::Result;

/// `POST /login` body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Sign-in email.
    pub email: String,
    /// Password.
    pub password: String,
    /// Page the user was sent away from, if any.
    #[serde(default)]
    pub from: Option<String>,
}

/// `POST /login` payload.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// Signed-in account.
    pub identity: Identity,
    /// Where the client should navigate next.
    pub redirect_to: String,
}

/// `POST /logout` payload.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Whether a session was closed.
    pub signed_out: bool,
}

/// Sign in through the allow-list and identity provider.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` or `AppError::Auth` on rejection.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>> {
    let signed_in = state.gate.sign_in(&body.email, &body.password).await?;
    Ok(ok(LoginResponse {
        token: signed_in.token,
        identity: signed_in.identity,
        redirect_to: post_login_destination(body.from.as_deref()),
    }))
}

/// Close the caller's session.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ConsoleSession>,
) -> ApiResponse<LogoutResponse> {
    let signed_out = state.gate.sign_out(&session.token).await;
    ok(LogoutResponse { signed_out })
}

/// Current session context; never rejects.
pub async fn session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResponse<SessionContext> {
    ok(state.gate.context(bearer_token(&headers)).await)
}
