//! JSON response envelope and error conversion.
//!
//! Every response carries `{"ok": bool, "data"?: ..., "error"?: ...}`.
//! Errors are turned into the operator-facing notice here, so no handler
//! ever surfaces an internal message verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use crate::{AppError, AuthFailure};

/// Outbound JSON envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable notice on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable failure code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Wrap `data` in a `200 OK` envelope.
pub fn ok<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse::success(data)
}

fn status_and_code(err: &AppError) -> (StatusCode, &'static str) {
    match err {
        AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        AppError::DuplicateAssignment(_) => (StatusCode::CONFLICT, "duplicate_assignment"),
        AppError::EmptyAssignment(_) => (StatusCode::CONFLICT, "empty_assignment"),
        AppError::MutationInFlight(_) => (StatusCode::CONFLICT, "mutation_in_flight"),
        AppError::RemoteWrite(_) => (StatusCode::BAD_GATEWAY, "remote_write"),
        AppError::Auth(reason) => {
            let status = match reason {
                AuthFailure::InvalidEmail => StatusCode::BAD_REQUEST,
                AuthFailure::EmailAlreadyInUse => StatusCode::CONFLICT,
                AuthFailure::UserDisabled => StatusCode::FORBIDDEN,
                AuthFailure::UserNotFound
                | AuthFailure::WrongPassword
                | AuthFailure::Other(_) => StatusCode::UNAUTHORIZED,
            };
            (status, reason.code())
        }
        AppError::Unauthorized(_) => (StatusCode::FORBIDDEN, "unauthorized"),
        AppError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
        AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
        AppError::Config(_) | AppError::Db(_) | AppError::Io(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = status_and_code(&self);
        if status.is_server_error() {
            error!(err = %self, "request failed");
        } else {
            warn!(err = %self, "request rejected");
        }
        let body: ApiResponse<()> = ApiResponse {
            ok: false,
            data: None,
            error: Some(self.notice()),
            code: Some(code),
        };
        (status, Json(body)).into_response()
    }
}
