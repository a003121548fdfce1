//! Error types for the daybook core.

use thiserror::Error;

use crate::date_key::DateKey;
use crate::event::EventId;

/// Errors that can occur in daybook operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDateKey(String),

    #[error("{date} plus {days} days is outside the supported calendar range")]
    DateOutOfRange { date: DateKey, days: i64 },

    #[error("Invalid month {0}. Expected 1-12")]
    InvalidMonth(u32),

    #[error("Could not parse time: \"{0}\"")]
    UnparseableTime(String),

    #[error("End time must be after start time ({start} - {end})")]
    InvalidTimeRange { start: String, end: String },

    #[error("Event title must not be empty")]
    EmptyTitle,

    #[error("No event at position {index} on {date} ({len} events)")]
    IndexOutOfRange {
        date: DateKey,
        index: usize,
        len: usize,
    },

    #[error("Event {id} not found on {date}")]
    EventNotFound { date: DateKey, id: EventId },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
