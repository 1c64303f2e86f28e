//! Error types for Director operations.
//!
//! Local argument problems (unknown object types, missing names) are detected
//! before any request is sent. Server rejections carry the HTTP status and the
//! raw response body so callers can diagnose them.

use thiserror::Error;

/// Boxed error produced by an HTTP transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for Director operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The object type is not present in the endpoint registry
    #[error("Unknown Director object type: {0}")]
    UnknownObjectType(String),

    /// The caller supplied a missing or contradictory set of parameters
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Director answered 404 for the targeted object
    #[error("Not found: {0}")]
    NotFound(String),

    /// The Director answered 409, usually a duplicate object name
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success response
    #[error("Director API error {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The transport failed before a response was received; the underlying
    /// failure is kept as the error source
    #[error("Transport failure: {0}")]
    Transport(#[source] TransportError),

    /// A successful response did not contain the expected JSON
    #[error("Failed to decode Director response: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized result type for Director operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownObjectType(_) => "UNKNOWN_OBJECT_TYPE",
            Self::InvalidArguments(_) => "INVALID_ARGUMENTS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Api { .. } => "API_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status code reported by the Director, if the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the error was raised locally, before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::UnknownObjectType(_) | Self::InvalidArguments(_) | Self::Config(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid URL: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::UnknownObjectType("Bogus".to_string()).error_code(),
            "UNKNOWN_OBJECT_TYPE"
        );
        assert_eq!(
            Error::InvalidArguments("test".to_string()).error_code(),
            "INVALID_ARGUMENTS"
        );
        assert_eq!(Error::NotFound("test".to_string()).error_code(), "NOT_FOUND");
        assert_eq!(Error::Conflict("test".to_string()).error_code(), "CONFLICT");
        assert_eq!(
            Error::Api {
                status: 500,
                body: "boom".to_string()
            }
            .error_code(),
            "API_ERROR"
        );
        assert_eq!(Error::Decode("test".to_string()).error_code(), "DECODE_ERROR");
        assert_eq!(Error::Config("test".to_string()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_error_display() {
        let err = Error::UnknownObjectType("Bogus".to_string());
        assert_eq!(err.to_string(), "Unknown Director object type: Bogus");

        let err = Error::Api {
            status: 422,
            body: "{\"error\":\"Trying to import unknown template\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Director API error 422: {\"error\":\"Trying to import unknown template\"}"
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::NotFound(String::new()).status(), Some(404));
        assert_eq!(Error::Conflict(String::new()).status(), Some(409));
        assert_eq!(
            Error::Api {
                status: 503,
                body: String::new()
            }
            .status(),
            Some(503)
        );
        assert_eq!(Error::InvalidArguments(String::new()).status(), None);
    }

    #[test]
    fn test_is_local() {
        assert!(Error::UnknownObjectType("x".to_string()).is_local());
        assert!(Error::InvalidArguments("x".to_string()).is_local());
        assert!(!Error::NotFound("x".to_string()).is_local());
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::Transport(Box::new(io));
        assert_eq!(err.to_string(), "Transport failure: refused");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.error_code(), "TRANSPORT_ERROR");
        assert!(err.status().is_none());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let director_err: Error = err.into();
        assert!(matches!(director_err, Error::Config(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let director_err: Error = err.into();
        assert!(matches!(director_err, Error::Decode(_)));
    }
}
