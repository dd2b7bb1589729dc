//! Request error handling
//!
//! Every failure a handler can report is one of three kinds, each with a fixed
//! status code:
//!
//! | Kind         | Status | Body `error`                       |
//! |--------------|--------|------------------------------------|
//! | `Connection` | 500    | generic, detail logged only        |
//! | `NotFound`   | 404    | names the key that matched nothing |
//! | `Internal`   | 500    | generic, detail logged only        |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const CONNECTION_FAILED_MESSAGE: &str = "Database connection failed";
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The catalog database could not be reached
    #[error("Database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A valid lookup matched nothing
    #[error("{0}")]
    NotFound(String),

    /// Query or shaping failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Internal(format!("Query failed: {}", err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Connection(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Connection(_) => CONNECTION_FAILED_MESSAGE.to_string(),
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Error response carrying the band envelope
#[derive(Debug)]
pub struct EnvelopeError {
    pub band: String,
    pub error: ApiError,
}

impl IntoResponse for EnvelopeError {
    fn into_response(self) -> Response {
        let status = self.error.status();

        if status.is_server_error() {
            error!("Request failed: {}", self.error);
        }

        let body = Json(json!({
            "band": self.band,
            "error": self.error.public_message(),
        }));

        (status, body).into_response()
    }
}

/// Response for a handler that panicked
pub fn panic_response(band: &str) -> Response {
    let body = Json(json!({
        "band": band,
        "error": INTERNAL_ERROR_MESSAGE,
    }));

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Connection(sqlx::Error::PoolTimedOut).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_errors_hide_detail() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.public_message(), INTERNAL_ERROR_MESSAGE);
        assert!(err.to_string().contains("Query failed"));

        let err = ApiError::Connection(sqlx::Error::PoolClosed);
        assert_eq!(err.public_message(), CONNECTION_FAILED_MESSAGE);
    }

    #[test]
    fn test_not_found_message_passes_through() {
        let err = ApiError::NotFound("Album 'Nonexistent' not found".into());
        assert_eq!(err.public_message(), "Album 'Nonexistent' not found");
    }

    #[tokio::test]
    async fn test_panic_response_is_enveloped_500() {
        let response = panic_response("Pearl Jam");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("Should parse JSON");
        assert_eq!(body, json!({ "band": "Pearl Jam", "error": INTERNAL_ERROR_MESSAGE }));
    }
}
