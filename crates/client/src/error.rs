//! Client error types.

use caldera_core::builder::ValidationError;
use caldera_core::time::TimeError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Time(#[from] TimeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let error = ClientError::ServerError {
            status: 422,
            message: "{\"errors\":{}}".to_string(),
        };
        assert_eq!(error.to_string(), "Server returned 422: {\"errors\":{}}");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let error: ClientError = ValidationError::Blank { field: "sub" }.into();
        assert_eq!(error.to_string(), "sub must not be blank");
    }

    #[test]
    fn test_time_error_is_transparent() {
        let error: ClientError = TimeError::InvalidState("instant").into();
        assert_eq!(error.to_string(), "Event time has no instant component");
    }
}
