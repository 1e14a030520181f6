//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use warden_core::error::{AppError, ErrorKind};

use crate::dto::response::ApiResponse;

/// HTTP status and envelope code for an error kind.
pub fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::TokenRevoked => (StatusCode::UNAUTHORIZED, "TOKEN_REVOKED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::Cache => (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE"),
        ErrorKind::Database
        | ErrorKind::Internal
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = status_and_code(self.kind);

        let message = if status.is_server_error() {
            tracing::error!(
                kind = %self.kind,
                error = %self.message,
                source = ?std::error::Error::source(&self),
                "Request failed"
            );
            match self.kind {
                ErrorKind::Cache => "Session store unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.message
        };

        (status, Json(ApiResponse::failure(code, message))).into_response()
    }
}
