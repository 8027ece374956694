//! Error types for the dispatch pipeline

use thiserror::Error;

/// Result type alias for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Main error type for the dispatch pipeline
///
/// Only `InvalidRequest` and `Config` ever reach a caller directly. Everything
/// raised inside a dispatch unit is contained there and surfaces as a failed
/// `DispatchOutcome`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The submitted request was absent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unrecognized application lifecycle state
    #[error("Invalid lifecycle state: {0}")]
    InvalidState(String),

    /// The presentation builder rejected the request
    #[error("Build error for notification {id}: {message}")]
    Build { id: i32, message: String },

    /// The presentation surface failed to show the notification
    #[error("Present error for notification {id}: {message}")]
    Present { id: i32, message: String },

    /// The host context was dropped before the unit started
    #[error("Execution context is no longer available")]
    ContextUnavailable,

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A dispatch unit panicked
    #[error("Dispatch unit panicked: {0}")]
    Panicked(String),

    /// Internal runtime failures (closed worker pool, lost completion channel)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DispatchError {
    /// Create a new invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a new invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Create a new build error
    pub fn build(id: i32, message: impl Into<String>) -> Self {
        Self::Build {
            id,
            message: message.into(),
        }
    }

    /// Create a new present error
    pub fn present(id: i32, message: impl Into<String>) -> Self {
        Self::Present {
            id,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error came from a presentation collaborator
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(self, Self::Build { .. } | Self::Present { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DispatchError::invalid_request("Notification cannot be empty").to_string(),
            "Invalid request: Notification cannot be empty"
        );
        assert_eq!(
            DispatchError::build(7, "missing picture").to_string(),
            "Build error for notification 7: missing picture"
        );
        assert_eq!(
            DispatchError::ContextUnavailable.to_string(),
            "Execution context is no longer available"
        );
    }

    #[test]
    fn test_collaborator_failure_classification() {
        assert!(DispatchError::build(1, "x").is_collaborator_failure());
        assert!(DispatchError::present(1, "x").is_collaborator_failure());
        assert!(!DispatchError::ContextUnavailable.is_collaborator_failure());
        assert!(!DispatchError::invalid_state("asleep").is_collaborator_failure());
    }
}
