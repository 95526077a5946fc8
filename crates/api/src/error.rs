use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use workforce_core::error::CoreError;

/// Whether error bodies carry internal detail. Set once at startup.
static DIAGNOSTICS: AtomicBool = AtomicBool::new(false);

/// Enable or disable the `detail` field on 5xx error bodies.
pub fn set_diagnostics(enabled: bool) {
    DIAGNOSTICS.store(enabled, Ordering::Relaxed);
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `workforce_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A malformed request (unparseable JSON, non-object body).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// `fail` for client errors, `error` for server errors.
    pub status: &'static str,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

const INTERNAL_MESSAGE: &str = "Something went wrong";

impl AppError {
    /// Status, machine code and client-facing message for this error.
    fn classify(&self) -> (StatusCode, &'static str, String) {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
                }
                CoreError::Validation(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    msg.clone(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    core.to_string(),
                ),
                CoreError::AccountDisabled => (
                    StatusCode::UNAUTHORIZED,
                    "ACCOUNT_DISABLED",
                    "Your account has been disabled. Please contact an administrator"
                        .to_string(),
                ),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "RESOURCE_NOT_FOUND",
                    format!("{entity} not found: {id}"),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(_) => internal(),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(_) => internal(),
        }
    }

    /// Render the error envelope, optionally with internal detail.
    pub fn to_response(&self, diagnostics: bool) -> Response {
        let (status, code, message) = self.classify();
        let server_side = status.is_server_error();
        if server_side {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            status: if server_side { "error" } else { "fail" },
            code,
            message,
            detail: (server_side && diagnostics).then(|| self.to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response(DIAGNOSTICS.load(Ordering::Relaxed))
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_SERVER_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let Some(constraint) = unique_violation(err) {
        if constraint.starts_with("uq_") {
            return (
                StatusCode::CONFLICT,
                "CONFLICT",
                conflict_message(constraint),
            );
        }
    }
    internal()
}

/// Constraint name of a PostgreSQL unique violation (`23505`), if `err` is one.
pub fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            Some(db_err.constraint().unwrap_or("unknown"))
        }
        _ => None,
    }
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "User with this email already exists".to_string(),
        "uq_users_employee_code" => "Employee ID is already in use".to_string(),
        "uq_projects_project_code" => "Project code is already in use".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
