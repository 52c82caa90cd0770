//! Time entry models.
//!
//! This module defines the [`TimeEntry`] produced by the hours calculator and
//! the [`TimeSubmission`] that carries the full context of a parsed
//! text-message command.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A validated work duration for one employee on one day.
///
/// # Example
///
/// ```
/// use timecard_engine::models::TimeEntry;
/// use rust_decimal::Decimal;
///
/// let entry = TimeEntry { duration_hours: Decimal::new(75, 1) };
/// assert_eq!(entry.duration_hours.to_string(), "7.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Hours worked, rounded to 2 decimal places.
    pub duration_hours: Decimal,
}

/// A parsed time submission such as
/// `time john smith 7:00am 3:30pm 0.5 "Main St"`.
///
/// The raw tokens are kept alongside the computed [`TimeEntry`] so the
/// confirmation reply can echo exactly what the employee sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSubmission {
    /// The leading command word (`time`, `hours`, ...).
    pub keyword: String,
    /// Employee first name as sent.
    pub first_name: String,
    /// Employee last name as sent.
    pub last_name: String,
    /// Start-of-shift token.
    pub start: String,
    /// End-of-shift token.
    pub end: String,
    /// Hours subtracted for lunch.
    pub lunch_hours: Decimal,
    /// Hours added on top of the shift.
    pub extra_hours: Decimal,
    /// Job location taken from a double-quoted span, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// The computed work duration.
    pub entry: TimeEntry,
}

impl TimeSubmission {
    /// Returns the submitted hours.
    pub fn hours(&self) -> Decimal {
        self.entry.duration_hours
    }
}
