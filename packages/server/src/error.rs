//! Application-level error type returned by handlers.
//!
//! All variants serialise to the single-field [`ErrorResponse`] JSON body
//! and map to the appropriate HTTP status code. Internal detail is logged
//! here and never reaches the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cradlelog_api::ErrorResponse;

use crate::storage::StorageError;

/// Generic message for all 500 responses. The underlying detail goes to the
/// log, not to the client.
const MSG_INTERNAL: &str = "伺服器發生錯誤，請稍後再試";

/// Message for a referenced record that does not exist.
pub const MSG_RECORD_NOT_FOUND: &str = "記錄不存在";

/// An error that a handler can return; converts directly to an HTTP response.
#[derive(Debug)]
pub enum AppError {
    /// Missing, empty, or malformed input — 400 with a field-specific message.
    BadRequest(String),
    /// The referenced resource does not exist — 404.
    NotFound(String),
    /// Anything unexpected — 500 with a generic message; detail is logged.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.to_string())
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => AppError::NotFound(MSG_RECORD_NOT_FOUND.into()),
            // Conflicts are consumed by the identity resolver; one escaping
            // this far is a bug, not a client error.
            StorageError::Conflict(msg) => AppError::Internal(format!("unexpected conflict: {msg}")),
            StorageError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_not_found_maps_to_404() {
        let e: AppError = StorageError::NotFound.into();
        assert!(matches!(e, AppError::NotFound(_)));
    }

    #[test]
    fn storage_conflict_maps_to_internal() {
        let e: AppError = StorageError::Conflict("dup".into()).into();
        assert!(matches!(e, AppError::Internal(_)));
    }
}
