use thiserror::Error;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A validation error (malformed or missing input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A conflict error (duplicate client email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An authentication error (missing credential or bad login).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// An invalid bearer token error (malformed or expired).
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// An internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;

/// Convert custom Error to HTTP response
///
/// Every variant maps to a status code and a `{success: false, error}` JSON
/// body. Store and internal failures are logged and collapsed into a generic
/// message so no internals leak to the caller.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            // The wire contract reports duplicate emails as 400, not 409.
            Error::Conflict(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::InvalidToken(msg) => (StatusCode::FORBIDDEN, msg),
            Error::Sqlx(e) => {
                tracing::error!(error = %e, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }
            Error::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }
            Error::Config(e) => {
                tracing::error!(error = %e, "configuration failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
