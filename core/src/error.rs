//! Error type shared by the hero and geo clients.
//!
//! # Design
//! Failures fall into two classes: the request never reached a server
//! (`Connectivity`, the "status 0" case) and the server answered with a
//! non-2xx status (`Http`). There are no per-status variants; callers that
//! care can inspect `status()`. Codec failures get their own variants so the
//! retry loop can tell them apart from transport trouble.

use thiserror::Error;

/// Errors surfaced by the API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No HTTP status was received: DNS, refused connection, timeout.
    #[error("connection failed: {0}")]
    Connectivity(String),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status that caused this error, if a server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity(_))
    }

    /// Transport-level failures are worth another attempt; codec failures
    /// would fail the same way again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Connectivity(_) | ApiError::Http { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_only_reported_for_http_errors() {
        let err = ApiError::Http {
            status: 404,
            body: "deliberate 404 error".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Connectivity("refused".to_string()).status(), None);
    }

    #[test]
    fn display_carries_original_message() {
        let err = ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert_eq!(
            ApiError::Connectivity("refused".to_string()).to_string(),
            "connection failed: refused"
        );
    }

    #[test]
    fn codec_errors_are_not_retryable() {
        assert!(ApiError::Connectivity(String::new()).is_retryable());
        assert!(!ApiError::Deserialization(String::new()).is_retryable());
        assert!(!ApiError::Serialization(String::new()).is_retryable());
    }
}
