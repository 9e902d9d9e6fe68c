//! Server error types.

use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Errors that can occur while starting or running the server.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed.
    #[error("Server error: {0}")]
    ServeError(#[source] std::io::Error),
}

/// JSON body of every error response: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned from a route handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.body.error
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Turn any failure into a logged 500 with a generic client message.
pub trait OrInternal<T> {
    /// Log the underlying error and replace it with `message`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::internal(message)` if `self` is an error.
    fn or_internal(self, message: &str) -> Result<T, ApiError>;
}

impl<T, E: Display> OrInternal<T> for Result<T, E> {
    fn or_internal(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::error!(error = %e, "{message}");
            ApiError::internal(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_bind_error_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let error = ServerError::BindError {
            address: "127.0.0.1:3000".to_string(),
            source: io_error,
        };
        assert!(error
            .to_string()
            .contains("Failed to bind to 127.0.0.1:3000"));
        assert!(error.to_string().contains("address in use"));
    }

    #[test]
    fn test_api_error_constructors() {
        assert_eq!(ApiError::bad_request("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        let error = ApiError::internal("Failed to fetch guides");
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Failed to fetch guides");
    }

    #[test]
    fn test_api_error_response_status() {
        let response = ApiError::not_found("Quote not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            error: "Message is required".to_string(),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"error": "Message is required"})
        );
    }

    #[test]
    fn test_or_internal_hides_cause() {
        let result: Result<(), StoreError> = Err(StoreError::TaskCancelled);
        let error = result.or_internal("Failed to fetch quotes").unwrap_err();
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message(), "Failed to fetch quotes");
    }
}
