use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ModelError;
use crate::book::Book;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadingEventType {
    StartedReading,
    RestartedReading,
    FinishedReading,
    AbandonedReading,
}

impl ReadingEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingEventType::StartedReading => "STARTED_READING",
            ReadingEventType::RestartedReading => "RESTARTED_READING",
            ReadingEventType::FinishedReading => "FINISHED_READING",
            ReadingEventType::AbandonedReading => "ABANDONED_READING",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReadingEventType::StartedReading => "Started",
            ReadingEventType::RestartedReading => "Restarted",
            ReadingEventType::FinishedReading => "Finished",
            ReadingEventType::AbandonedReading => "Abandoned",
        }
    }
}

impl fmt::Display for ReadingEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingEventType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STARTED_READING" => Ok(Self::StartedReading),
            "RESTARTED_READING" => Ok(Self::RestartedReading),
            "FINISHED_READING" => Ok(Self::FinishedReading),
            "ABANDONED_READING" => Ok(Self::AbandonedReading),
            _ => Err(ModelError::UnknownReadingEvent(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingEvent {
    #[serde(default)]
    pub id: Option<i64>,
    pub event_type: ReadingEventType,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

/// A book on the user's shelves together with its most recent reading event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookWithReadingStatus {
    #[serde(flatten)]
    pub book: Book,
    #[serde(default)]
    pub latest_reading_event: Option<ReadingEvent>,
}

impl BookWithReadingStatus {
    pub fn event_type(&self) -> Option<ReadingEventType> {
        self.latest_reading_event.as_ref().map(|event| event.event_type)
    }
}
