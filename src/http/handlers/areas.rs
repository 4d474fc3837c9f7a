//! Reference area routes.

use std::sync::Arc;

use axum::extract::State;
use axum::Extension;
use serde::Serialize;

use crate::http::guard::ConsoleSession;
use crate::http::response::{ok, ApiResponse};
use crate::http::AppState;
use crate::models::area::Area;
use crate::Result;

/// `POST /areas/initialize` payload.
#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    /// Number of areas written.
    pub written: usize,
}

/// Active areas sorted by display name.
///
/// # Errors
///
/// Returns the store error if areas cannot be loaded.
pub async fn list(Extension(session): Extension<ConsoleSession>) -> Result<ApiResponse<Vec<Area>>> {
    Ok(ok(session.console.active_areas().await?))
}

/// Create or reactivate the configured seed areas.
///
/// # Errors
///
/// Returns `AppError::RemoteWrite` if a write fails.
pub async fn initialize(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<ConsoleSession>,
) -> Result<ApiResponse<InitializeResponse>> {
    let written = session
        .console
        .initialize_areas(&state.config.seed_areas)
        .await?;
    Ok(ok(InitializeResponse { written }))
}
