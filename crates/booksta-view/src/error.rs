//! View-model error types.
//!
//! Gateway failures never escape a view-model as `Err`; they are converted
//! into a [`ViewError`] and surfaced as a banner or a toast.

use booksta_gateway::GatewayError;
use thiserror::Error;

use crate::filter::FilterError;
use crate::validation::FieldErrors;

/// How an error should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Brief toast, auto-dismissed.
    Transient,
    /// Banner that stays until dismissed or the next successful load.
    Banner,
    /// Inline beside form fields.
    Inline,
    /// The user must log in first.
    Redirect,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViewError {
    // =========================================================================
    // REMOTE
    // =========================================================================
    /// Fetching a collection or detail failed.
    #[error("Failed to load {what}: {reason}")]
    LoadFailed { what: String, reason: String },

    /// A write against the API failed.
    #[error("Failed to {operation}: {reason}")]
    MutationFailed { operation: String, reason: String },

    // =========================================================================
    // LOCAL
    // =========================================================================
    /// Form input was rejected before anything was sent.
    #[error("{} field(s) need attention", .0.len())]
    Validation(FieldErrors),

    /// The action requires a logged-in user.
    #[error("You must be logged in to do that")]
    NotAuthenticated,

    /// A filter update referenced an unknown field or the wrong value kind.
    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl ViewError {
    pub fn load(what: impl Into<String>, err: &GatewayError) -> Self {
        Self::LoadFailed {
            what: what.into(),
            reason: err.user_message().to_string(),
        }
    }

    pub fn mutation(operation: impl Into<String>, err: &GatewayError) -> Self {
        Self::MutationFailed {
            operation: operation.into(),
            reason: err.user_message().to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LoadFailed { .. } => ErrorCategory::Banner,
            Self::MutationFailed { .. } => ErrorCategory::Transient,
            Self::Validation(_) | Self::Filter(_) => ErrorCategory::Inline,
            Self::NotAuthenticated => ErrorCategory::Redirect,
        }
    }

    /// Check if this error should be shown as a transient toast notification.
    pub fn is_transient(&self) -> bool {
        self.category() == ErrorCategory::Transient
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::LoadFailed { .. } => Some("Check your connection and refresh."),
            Self::MutationFailed { .. } => Some("Please try again."),
            Self::Validation(_) => Some("Correct the highlighted fields and submit again."),
            Self::NotAuthenticated => Some("Log in and try again."),
            Self::Filter(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
