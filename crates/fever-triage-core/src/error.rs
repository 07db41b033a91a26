//! Error types for the fever triage client.
//!
//! Every failure a submit attempt can hit collapses into one of two
//! user-facing kinds: a transport failure (fixed connectivity message) or an
//! error reported by the backend (shown verbatim).

use thiserror::Error;

use crate::text;

/// Result type alias for fever triage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the fever triage client
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Transport Errors
    // ==========================================================================
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    // ==========================================================================
    // Backend Errors
    // ==========================================================================
    #[error("Backend reported an error: {0}")]
    BackendReported(String),

    // ==========================================================================
    // Client Errors
    // ==========================================================================
    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

/// The two failure kinds a submit attempt can surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not complete, returned a non-success status, or its
    /// body could not be decoded.
    Transport,
    /// The backend answered but flagged the request as failed.
    BackendReported,
}

impl Error {
    /// Returns the error type string (for logs and the JS boundary)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Network(_) => "NETWORK_ERROR",
            Self::HttpStatus(_) => "HTTP_STATUS",
            Self::Timeout(_) => "TIMEOUT",
            Self::Decode(_) => "DECODE_ERROR",
            Self::BackendReported(_) => "BACKEND_ERROR",
            Self::UnknownPage(_) => "UNKNOWN_PAGE",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Dom(_) => "DOM_ERROR",
        }
    }

    /// Classify the error into the user-facing failure taxonomy.
    ///
    /// Anything that is not an explicit backend report is treated as a
    /// transport failure, including local errors that abort a submit.
    #[must_use]
    pub const fn failure_kind(&self) -> FailureKind {
        match self {
            Self::BackendReported(_) => FailureKind::BackendReported,
            Self::Network(_)
            | Self::HttpStatus(_)
            | Self::Timeout(_)
            | Self::Decode(_)
            | Self::UnknownPage(_)
            | Self::InvalidConfig(_)
            | Self::Dom(_) => FailureKind::Transport,
        }
    }

    /// The exact text written into the form's error area.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::BackendReported(message) => message.clone(),
            _ => text::CONNECTIVITY_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> Error {
        Error::Decode(serde_json::from_str::<serde_json::Value>("{").unwrap_err())
    }

    #[test]
    fn test_error_type_mapping_exhaustive() {
        let cases: Vec<(Error, &str)> = vec![
            (Error::Network("x".into()), "NETWORK_ERROR"),
            (Error::HttpStatus(500), "HTTP_STATUS"),
            (Error::Timeout(15_000), "TIMEOUT"),
            (decode_error(), "DECODE_ERROR"),
            (Error::BackendReported("x".into()), "BACKEND_ERROR"),
            (Error::UnknownPage("x".into()), "UNKNOWN_PAGE"),
            (Error::InvalidConfig("x".into()), "INVALID_CONFIG"),
            (Error::Dom("x".into()), "DOM_ERROR"),
        ];

        for (err, expected_type) in &cases {
            assert_eq!(
                err.error_type(),
                *expected_type,
                "Error {err:?} should map to {expected_type}"
            );
        }
    }

    #[test]
    fn only_backend_reports_are_shown_verbatim() {
        let backend = Error::BackendReported("no model".into());
        assert_eq!(backend.failure_kind(), FailureKind::BackendReported);
        assert_eq!(backend.user_message(), "no model");

        for err in [
            Error::Network("connection refused".into()),
            Error::HttpStatus(503),
            Error::Timeout(10),
            decode_error(),
        ] {
            assert_eq!(err.failure_kind(), FailureKind::Transport);
            assert_eq!(err.user_message(), text::CONNECTIVITY_ERROR);
        }
    }

    #[test]
    fn http_status_message_hides_body() {
        let err = Error::HttpStatus(400);
        assert!(!err.user_message().contains("400"));
        assert_eq!(err.to_string(), "Unexpected HTTP status: 400");
    }
}
