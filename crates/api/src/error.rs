use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use widget_core::error::CoreError;
use widget_db::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for store
/// failures, plus an HTTP-level internal error. Implements [`IntoResponse`].
///
/// A missing widget and a failed `If-Match` precondition both come out as a
/// bare 404 with no body: callers cannot tell "never existed" from "moved past
/// the version you expected". Every other error uses the JSON envelope
/// `{ "error": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `widget_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error reported by the widget store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    return StatusCode::NOT_FOUND.into_response();
                }
                CoreError::PreconditionFailed { entity, id } => {
                    tracing::debug!(entity, id, "If-Match precondition failed");
                    return StatusCode::NOT_FOUND.into_response();
                }
                CoreError::PreconditionRequired(msg) => (
                    StatusCode::PRECONDITION_REQUIRED,
                    "PRECONDITION_REQUIRED",
                    msg.clone(),
                ),
            },

            // --- Store errors ---
            AppError::Store(err) => match classify_store_error(err) {
                Some(classified) => classified,
                None => return StatusCode::NOT_FOUND.into_response(),
            },

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// Returns `None` for errors that surface as a bodiless 404: the id vanished
/// or another writer moved the version between lookup and save.
fn classify_store_error(err: &StoreError) -> Option<(StatusCode, &'static str, String)> {
    match err {
        StoreError::NotFound { id } => {
            tracing::debug!(id, "Widget disappeared before save");
            None
        }
        StoreError::VersionConflict {
            id,
            expected,
            actual,
        } => {
            tracing::debug!(id, expected, actual, "Widget version moved before save");
            None
        }
        StoreError::Database(db_err) => {
            tracing::error!(error = %db_err, "Database error");
            Some(internal())
        }
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "Store error");
            Some(internal())
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
