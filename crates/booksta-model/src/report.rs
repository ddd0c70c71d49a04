//! Moderation reports filed by users against books or authors.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::book::{Author, Book};
use crate::ids::ReportId;
use crate::user::User;

/// Lifecycle of a report as tracked by the moderation back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [Self::Pending, Self::Resolved, Self::Dismissed];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::Resolved => "RESOLVED",
            ReportStatus::Dismissed => "DISMISSED",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "RESOLVED" => Ok(Self::Resolved),
            "DISMISSED" => Ok(Self::Dismissed),
            _ => Err(ModelError::UnknownReportStatus(s.to_string())),
        }
    }
}

/// What a report points at. Derived from the references, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportCategory {
    Book,
    Author,
    Unknown,
}

impl ReportCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportCategory::Book => "BOOK",
            ReportCategory::Author => "AUTHOR",
            ReportCategory::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ReportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BOOK" => Ok(Self::Book),
            "AUTHOR" => Ok(Self::Author),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(ModelError::UnknownReportCategory(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message_report: String,
    pub report_status: ReportStatus,
    /// The reporter.
    pub user: User,
    #[serde(default)]
    pub book: Option<Book>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Report {
    /// A book reference takes precedence over an author reference.
    pub fn category(&self) -> ReportCategory {
        if self.book.is_some() {
            ReportCategory::Book
        } else if self.author.is_some() {
            ReportCategory::Author
        } else {
            ReportCategory::Unknown
        }
    }
}
