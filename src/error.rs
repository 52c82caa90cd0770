//! Error types for the Timecard Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Parser and pay-period failures keep their own enums so the messaging
//! gateway can map every kind to a distinct reply; [`EngineError`] wraps
//! them together with configuration and state-file failures.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Which time token of a submission failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSide {
    /// The start-of-shift token.
    Start,
    /// The end-of-shift token.
    End,
}

impl std::fmt::Display for TimeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeSide::Start => write!(f, "start"),
            TimeSide::End => write!(f, "end"),
        }
    }
}

/// Failures produced while parsing a text-message time submission.
///
/// # Example
///
/// ```
/// use timecard_engine::error::TimeEntryError;
///
/// let error = TimeEntryError::TooFewFields { found: 4 };
/// assert_eq!(error.to_string(), "too few parameters: expected at least 6, found 4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeEntryError {
    /// Fewer than 6 fields remained after location extraction.
    #[error("too few parameters: expected at least 6, found {found}")]
    TooFewFields {
        /// Number of fields found.
        found: usize,
    },

    /// More than 7 fields remained after location extraction.
    #[error("too many parameters: expected at most 7, found {found}")]
    TooManyFields {
        /// Number of fields found.
        found: usize,
    },

    /// A time token had the wrong overall length.
    #[error("{side} time '{token}' is formatted incorrectly")]
    TimeFormatInvalid {
        /// Which token failed.
        side: TimeSide,
        /// The offending token.
        token: String,
    },

    /// The hour part was not a number or fell outside the allowed range.
    #[error("{side} time '{token}': hours spot is wrong")]
    HoursOutOfRange {
        /// Which token failed.
        side: TimeSide,
        /// The offending token.
        token: String,
    },

    /// The token did not end in `am` or `pm`.
    #[error("{side} time '{token}': meridiem is wrong (am/pm)")]
    MeridiemInvalid {
        /// Which token failed.
        side: TimeSide,
        /// The offending token.
        token: String,
    },

    /// The minute part was not two digits in 0..=59.
    #[error("{side} time '{token}': minutes spot is wrong")]
    MinutesOutOfRange {
        /// Which token failed.
        side: TimeSide,
        /// The offending token.
        token: String,
    },

    /// The end time is earlier than the start time.
    #[error("end time {end} is before start time {start}")]
    EndBeforeStart {
        /// The start token.
        start: String,
        /// The end token.
        end: String,
    },

    /// The lunch (subtracted hours) field is not a number.
    #[error("subtracted hours '{value}' formatted incorrectly")]
    LunchFormatInvalid {
        /// The offending field.
        value: String,
    },

    /// The extra (additional hours) field is not a number.
    #[error("additional hours '{value}' formatted incorrectly")]
    ExtraFormatInvalid {
        /// The offending field.
        value: String,
    },
}

impl TimeEntryError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            TimeEntryError::TooFewFields { .. } => "TOO_FEW_FIELDS",
            TimeEntryError::TooManyFields { .. } => "TOO_MANY_FIELDS",
            TimeEntryError::TimeFormatInvalid { .. } => "TIME_FORMAT_INVALID",
            TimeEntryError::HoursOutOfRange { .. } => "HOURS_OUT_OF_RANGE",
            TimeEntryError::MeridiemInvalid { .. } => "MERIDIEM_INVALID",
            TimeEntryError::MinutesOutOfRange { .. } => "MINUTES_OUT_OF_RANGE",
            TimeEntryError::EndBeforeStart { .. } => "END_BEFORE_START",
            TimeEntryError::LunchFormatInvalid { .. } => "LUNCH_FORMAT_INVALID",
            TimeEntryError::ExtraFormatInvalid { .. } => "EXTRA_FORMAT_INVALID",
        }
    }
}

/// Failures produced by pay-period and ledger calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// The timezone name is not a known IANA zone.
    #[error("unknown timezone: {name}")]
    InvalidTimezone {
        /// The name that failed to resolve.
        name: String,
    },

    /// A ledger entry fell outside the ledger's pay period.
    #[error("date {date} not in pay period {start} to {end}")]
    DateNotInPeriod {
        /// The rejected date.
        date: NaiveDate,
        /// First day of the period.
        start: NaiveDate,
        /// Last day of the period.
        end: NaiveDate,
    },

    /// A ledger entry carried negative hours.
    #[error("hours cannot be negative: {hours}")]
    NegativeHours {
        /// The rejected value.
        hours: Decimal,
    },

    /// Adding hours would overflow the day or period total.
    #[error("hours {hours} on {date} overflow the time card total")]
    HoursOverflow {
        /// The day the hours were recorded on.
        date: NaiveDate,
        /// The rejected value.
        hours: Decimal,
    },

    /// A period or payday would fall outside the supported calendar.
    #[error("date {date} is outside the supported calendar range")]
    DateOutOfRange {
        /// The date the calculation started from.
        date: NaiveDate,
    },

    /// The end of a date range is before its start.
    #[error("end date {end} cannot be before start date {start}")]
    InvalidDateRange {
        /// Range start.
        start: NaiveDate,
        /// Range end.
        end: NaiveDate,
    },
}

impl PeriodError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            PeriodError::InvalidTimezone { .. } => "INVALID_TIMEZONE",
            PeriodError::DateNotInPeriod { .. } => "DATE_NOT_IN_PERIOD",
            PeriodError::NegativeHours { .. } => "NEGATIVE_HOURS",
            PeriodError::HoursOverflow { .. } => "HOURS_OVERFLOW",
            PeriodError::DateOutOfRange { .. } => "DATE_OUT_OF_RANGE",
            PeriodError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        }
    }
}

/// The main error type for the Timecard Engine.
///
/// # Example
///
/// ```
/// use timecard_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/timebot.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/timebot.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The continuation state file could not be read or written.
    #[error("Continuation state I/O failed for '{path}': {source}")]
    StateIo {
        /// The state file path.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The continuation state file does not hold a `YYYY-MM-DD` date.
    #[error("Continuation state '{path}' holds an invalid date: '{value}'")]
    StateParse {
        /// The state file path.
        path: String,
        /// The stored contents.
        value: String,
    },

    /// A time submission was rejected.
    #[error(transparent)]
    TimeEntry(#[from] TimeEntryError),

    /// A pay-period or ledger calculation was rejected.
    #[error(transparent)]
    Period(#[from] PeriodError),
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
