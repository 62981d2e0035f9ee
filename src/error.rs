//! Error types for the healthrecords library.

use thiserror::Error;

use crate::forms::FieldErrors;

/// Main error type for healthrecords operations.
#[derive(Error, Debug)]
pub enum HrError {
    /// HTTP request failed with a status code and no usable message.
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Local storage read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The server rejected the bearer token (401/403).
    #[error("Session is no longer authorized")]
    Unauthorized,

    /// The server answered with an error status and a message.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Client-side form validation failed; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The action is not valid for this kind of node.
    #[error("Cannot {action} a {kind}")]
    InvalidAction {
        action: &'static str,
        kind: &'static str,
    },

    /// The operation needs a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl HrError {
    /// True when the failure came from the network or from an unreadable body.
    ///
    /// These are the failures the front end reports with a generic banner.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            HrError::RequestError(_) | HrError::Transport(_) | HrError::JsonError(_)
        )
    }
}

/// Result type alias for healthrecords operations.
pub type Result<T> = std::result::Result<T, HrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_classification() {
        assert!(HrError::Transport("reset".into()).is_network());
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert!(HrError::from(json_err).is_network());
        assert!(!HrError::Unauthorized.is_network());
        assert!(!HrError::HttpError(500).is_network());
    }

    #[test]
    fn test_invalid_action_message() {
        let err = HrError::InvalidAction {
            action: "share",
            kind: "folder",
        };
        assert_eq!(err.to_string(), "Cannot share a folder");
    }
}
