use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use nawy_core::error::CoreError;
use serde_json::json;

/// Whether 500 responses include the underlying error text as `detail`.
/// Off unless the server opts in for a non-production environment.
static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

/// Enable or disable `detail` on 500 responses for the whole process.
pub fn set_expose_internal_details(expose: bool) {
    EXPOSE_INTERNAL_DETAILS.store(expose, Ordering::Relaxed);
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `nawy_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A request the extractors could not decode (malformed JSON, a wrong
    /// `Content-Type`, a repeated query key).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, code and message for one error, plus optional extra body fields.
struct ErrorBody {
    status: StatusCode,
    code: &'static str,
    message: String,
    field: Option<&'static str>,
    errors: Option<Vec<String>>,
    detail: Option<String>,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            field: None,
            errors: None,
            detail: None,
        }
    }

    /// Generic 500 body. The real cause is logged and only echoed back as
    /// `detail` when internal details are exposed.
    fn internal(cause: String) -> Self {
        let detail = EXPOSE_INTERNAL_DETAILS
            .load(Ordering::Relaxed)
            .then_some(cause);
        Self {
            detail,
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred",
            )
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    ErrorBody::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("{entity} not found"))
                }
                err @ CoreError::InvalidParameter { field, .. } => ErrorBody {
                    field: Some(field),
                    ..ErrorBody::new(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", err.to_string())
                },
                CoreError::RecordValidation(errors) => ErrorBody {
                    errors: Some(errors),
                    ..ErrorBody::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Validation failed")
                },
                CoreError::Conflict(msg) => {
                    ErrorBody::new(StatusCode::BAD_REQUEST, "CONFLICT", msg)
                }
            },

            // --- Database errors ---
            // Expected storage outcomes (absence, duplicates) are turned into
            // CoreError by the handlers, so anything reaching here is a 500.
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                ErrorBody::internal(err.to_string())
            }

            // --- Request decoding ---
            AppError::BadRequest(msg) => {
                tracing::debug!(error = %msg, "Rejected request");
                ErrorBody::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg)
            }
        };

        let mut json = json!({
            "error": body.message,
            "code": body.code,
        });
        if let Some(field) = body.field {
            json["field"] = json!(field);
        }
        if let Some(errors) = body.errors {
            json["errors"] = json!(errors);
        }
        if let Some(detail) = body.detail {
            json["detail"] = json!(detail);
        }

        (body.status, axum::Json(json)).into_response()
    }
}
