//! Client error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied an invalid parameter combination.
    ///
    /// Raised before any request is sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Server returned an error response (status >= 400).
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error code from the server, if the body carried one.
        code: Option<String>,
        /// Error message from the server, or the reason the body was unreadable.
        message: String,
    },

    /// The request could not complete (connection, DNS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response did not match the expected record shape.
    #[error("response does not match schema at '{path}': {message}")]
    Schema {
        /// Path of the offending field (e.g. `[0].type`).
        path: String,
        /// Decoder message.
        message: String,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The client was closed.
    #[error("client is closed")]
    Closed,
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// HTTP status code, for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api { status: 401 | 403, .. })
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
    }

    /// Check if the caller's parameters were rejected locally.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Check if a response failed schema validation.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Error::Schema { .. })
    }

    /// Check if the request failed at the transport level.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the server on any status >= 400.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            status: 404,
            code: Some("NOT_FOUND".to_string()),
            message: "no such package".to_string(),
        };
        assert_eq!(err.to_string(), "API error (404): no such package");
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_predicates() {
        let err = Error::Api {
            status: 503,
            code: None,
            message: "unavailable".to_string(),
        };
        assert!(err.is_server_error());
        assert!(!err.is_auth_error());

        let err = Error::Api {
            status: 401,
            code: None,
            message: "unauthorized".to_string(),
        };
        assert!(err.is_auth_error());

        let err = Error::invalid_input("bad combination");
        assert!(err.is_caller_error());
        assert_eq!(err.status(), None);

        let err = Error::Schema {
            path: "description".to_string(),
            message: "missing field `description`".to_string(),
        };
        assert!(err.is_schema_error());
        assert!(err.to_string().contains("description"));
        assert!(!err.is_transport_error());
    }

    #[test]
    fn test_error_response_decodes() {
        let body: ErrorResponse =
            serde_json::from_str(r#"{"code":"NOT_FOUND","message":"gone"}"#).unwrap();
        assert_eq!(body.code, "NOT_FOUND");
        assert_eq!(body.message, "gone");
    }

    #[test]
    fn test_url_error_conversion() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
