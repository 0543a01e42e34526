//! Error taxonomy for report calls
//!
//! Every report method returns exactly one of these on failure. Nothing is
//! retried or logged inside the client; the variants carry enough context for
//! the caller to decide.

use thiserror::Error;

/// Cause of a failure below the HTTP layer (DNS, refused connection, timeout,
/// truncated body).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A required argument was missing or invalid. Raised before any network access.
    #[error("invalid argument `{field}`: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The remote host could not be reached or the exchange broke off.
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),

    /// The service answered with a non-success status.
    #[error("remote service returned HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// The body was not a JSON object.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ReportError {
    pub(crate) fn missing(field: &'static str) -> Self {
        Self::Validation {
            field,
            reason: "must not be empty".to_string(),
        }
    }

    /// True for 401/403 responses, i.e. bad credentials or a project the
    /// account cannot see.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Remote { status: 401 | 403, .. })
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Transport failures, rate limiting (429) and server errors (5xx) are
    /// retryable; validation, decode and other 4xx failures are not. The
    /// client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Remote { status, .. } => *status == 429 || (500..600).contains(status),
            Self::Validation { .. } | Self::Decode(_) => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(status: u16) -> ReportError {
        ReportError::Remote {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_auth_failures() {
        assert!(remote(401).is_auth_failure());
        assert!(remote(403).is_auth_failure());
        assert!(!remote(404).is_auth_failure());
        assert!(!ReportError::Decode("x".into()).is_auth_failure());
    }

    #[test]
    fn test_retry_classification() {
        assert!(remote(429).is_retryable());
        assert!(remote(503).is_retryable());
        assert!(!remote(400).is_retryable());
        assert!(!remote(401).is_retryable());
        assert!(!ReportError::missing("projectId").is_retryable());
        assert!(!ReportError::Decode("bad".into()).is_retryable());

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(ReportError::Transport(Box::new(io)).is_retryable());
    }

    #[test]
    fn test_display_includes_status_and_body() {
        let err = ReportError::Remote {
            status: 401,
            body: r#"{"error":"unauthorized"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"remote service returned HTTP 401: {"error":"unauthorized"}"#
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = ReportError::missing("projectId");
        assert_eq!(
            err.to_string(),
            "invalid argument `projectId`: must not be empty"
        );
    }
}
