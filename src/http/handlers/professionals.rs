//! Professional roster routes.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::http::guard::ConsoleSession;
use crate::http::response::{ok, ApiResponse};
use crate::models::professional::{NewProfessional, Professional, ProfessionalForm};
use crate::Result;

/// Professionals eligible for assignment, sorted by name.
///
/// # Errors
///
/// Returns the store error if the roster cannot be loaded.
pub async fn candidates(
    Extension(session): Extension<ConsoleSession>,
) -> Result<ApiResponse<Vec<Professional>>> {
    Ok(ok(session.console.candidates().await?))
}

/// Save a professional's profile.
///
/// # Errors
///
/// Returns `AppError::Validation`, `AppError::NotFound` or `AppError::RemoteWrite`.
pub async fn update(
    Extension(session): Extension<ConsoleSession>,
    Path(id): Path<String>,
    Json(form): Json<ProfessionalForm>,
) -> Result<ApiResponse<Professional>> {
    Ok(ok(session.console.update_professional(&id, &form).await?))
}

/// Create a professional with its sign-in account.
///
/// # Errors
///
/// Returns `AppError::Validation`, `AppError::Auth` or `AppError::RemoteWrite`.
pub async fn create(
    Extension(session): Extension<ConsoleSession>,
    Json(request): Json<NewProfessional>,
) -> Result<(StatusCode, ApiResponse<Professional>)> {
    let created = session.console.create_professional(request).await?;
    Ok((StatusCode::CREATED, ok(created)))
}
