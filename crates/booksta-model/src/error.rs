use thiserror::Error;

/// Errors raised while constructing or parsing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid ISBN: {0:?}")]
    InvalidIsbn(String),
    #[error("unknown report status: {0}")]
    UnknownReportStatus(String),
    #[error("unknown report category: {0}")]
    UnknownReportCategory(String),
    #[error("unknown reading event type: {0}")]
    UnknownReadingEvent(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
