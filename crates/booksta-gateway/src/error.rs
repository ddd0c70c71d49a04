//! Error types for gateway calls.

use thiserror::Error;

/// Errors that can occur while talking to the Booksta API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Missing or expired credentials (401).
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed (403).
    #[error("forbidden")]
    Forbidden,

    /// The addressed resource does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The write collides with existing state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The gateway could not be configured.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GatewayError {
    /// Builds the error for a non-success response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Status { status, message },
        }
    }

    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach Booksta. Please check your connection.",
            Self::Unauthorized => "Please log in to continue.",
            Self::Forbidden => "You do not have permission to do that.",
            Self::NotFound(_) => "The requested item could not be found.",
            Self::Conflict(_) => "That change conflicts with existing data.",
            Self::Status { .. } | Self::Decode(_) => "An unexpected error occurred.",
            Self::InvalidConfig(_) => "The client is not configured correctly.",
        }
    }

    /// Returns whether this error is potentially recoverable with a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
