//! Text-message command parsing.
//!
//! This module recognises time submissions sent by text message, splits
//! them into fields, and produces either a [`TimeSubmission`] or the
//! [`TimeEntryError`] describing what was wrong. It also builds the reply
//! texts sent back to the employee.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TimeEntryError;
use crate::models::TimeSubmission;

use super::hours::{calculate_time, parse_hours_field};

/// Minimum number of whitespace-separated fields in a submission.
pub const MIN_FIELDS: usize = 6;

/// Maximum number of whitespace-separated fields in a submission.
pub const MAX_FIELDS: usize = 7;

/// Reply sent when an employee asks for help.
pub const HELP_REPLY: &str = "Submit hours as: time <first> <last> <start> <end> <lunch hours> \
[extra hours] [\"job name\"]\nExample: time john smith 7:00am 3:30pm 0.5 \"Main St\"";

static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("valid location pattern"));

/// How an inbound text message should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A time submission to parse.
    Submission,
    /// A request for usage help.
    Help,
    /// Not addressed to the bot.
    Ignored,
}

/// Classifies a message body by its leading keyword.
///
/// A body starting with one of `keywords` (case-insensitive) is a
/// submission, unless it mentions `help`.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::{classify_message, MessageKind};
///
/// let keywords = ["time".to_string(), "hours".to_string()];
/// assert_eq!(classify_message("Time john smith 9am 5pm 1", &keywords), MessageKind::Submission);
/// assert_eq!(classify_message("hours help", &keywords), MessageKind::Help);
/// assert_eq!(classify_message("see you tomorrow", &keywords), MessageKind::Ignored);
/// ```
pub fn classify_message(body: &str, keywords: &[String]) -> MessageKind {
    let lowered = body.trim_start().to_lowercase();

    let addressed = keywords
        .iter()
        .any(|k| !k.is_empty() && lowered.starts_with(&k.to_lowercase()));

    if !addressed {
        MessageKind::Ignored
    } else if lowered.contains("help") {
        MessageKind::Help
    } else {
        MessageKind::Submission
    }
}

/// Splits a double-quoted location out of a message body.
///
/// Returns the first quoted span (without quotes) and the body with every
/// quoted span removed.
pub fn extract_location(body: &str) -> (Option<String>, String) {
    let location = LOCATION
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|l| !l.is_empty());

    match location {
        Some(location) => (Some(location), LOCATION.replace_all(body, "").into_owned()),
        None => (None, body.to_string()),
    }
}

/// Parses a full time submission.
///
/// The expected shape is
/// `<keyword> <first> <last> <start> <end> <lunch> [<extra>]`, optionally
/// with a double-quoted job location anywhere in the body. `extra`
/// defaults to `0`.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::parse_submission;
/// use rust_decimal::Decimal;
///
/// let submission = parse_submission(r#"time john smith 7:00am 3:30pm 0.5 "Main St""#)?;
/// assert_eq!(submission.first_name, "john");
/// assert_eq!(submission.location.as_deref(), Some("Main St"));
/// assert_eq!(submission.hours(), Decimal::new(8, 0));
/// # Ok::<(), timecard_engine::error::TimeEntryError>(())
/// ```
pub fn parse_submission(body: &str) -> Result<TimeSubmission, TimeEntryError> {
    let (location, remainder) = extract_location(body);
    let fields: Vec<&str> = remainder.split_whitespace().collect();

    if fields.len() < MIN_FIELDS {
        return Err(TimeEntryError::TooFewFields {
            found: fields.len(),
        });
    }
    if fields.len() > MAX_FIELDS {
        return Err(TimeEntryError::TooManyFields {
            found: fields.len(),
        });
    }

    let (start, end, lunch) = (fields[3], fields[4], fields[5]);
    let extra = fields.get(6).copied().unwrap_or("0");

    let entry = calculate_time(start, end, lunch, extra)?;

    // calculate_time has already validated both fields.
    let lunch_hours = parse_hours_field(lunch).unwrap_or_default();
    let extra_hours = parse_hours_field(extra).unwrap_or_default();

    Ok(TimeSubmission {
        keyword: fields[0].to_lowercase(),
        first_name: fields[1].to_string(),
        last_name: fields[2].to_string(),
        start: start.to_string(),
        end: end.to_string(),
        lunch_hours,
        extra_hours,
        location,
        entry,
    })
}

/// The reply text for a rejected submission.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::rejection_reply;
/// use timecard_engine::error::TimeEntryError;
///
/// let reply = rejection_reply(&TimeEntryError::TooFewFields { found: 3 });
/// assert_eq!(reply, "Error. Time formatted incorrectly. Too few parameters.");
/// ```
pub fn rejection_reply(error: &TimeEntryError) -> &'static str {
    match error {
        TimeEntryError::TooFewFields { .. } => {
            "Error. Time formatted incorrectly. Too few parameters."
        }
        TimeEntryError::TooManyFields { .. } => {
            "Error. Time formatted incorrectly. Too many parameters."
        }
        TimeEntryError::TimeFormatInvalid { .. } => "Error. Time formatted incorrectly.",
        TimeEntryError::HoursOutOfRange { .. } => {
            "Error. Time formatted incorrectly. Hours spot is wrong."
        }
        TimeEntryError::MeridiemInvalid { .. } => {
            "Error. Time formatted incorrectly. Meridiem is wrong. (am/pm)"
        }
        TimeEntryError::MinutesOutOfRange { .. } => {
            "Error. Time formatted incorrectly. Minutes spot is wrong."
        }
        TimeEntryError::EndBeforeStart { .. } => {
            "Error. Time formatted incorrectly. End time is before start time..."
        }
        TimeEntryError::LunchFormatInvalid { .. } => {
            "Error. Subtracted hours formatted incorrectly."
        }
        TimeEntryError::ExtraFormatInvalid { .. } => {
            "Error. Additional hours formatted incorrectly."
        }
    }
}

/// The confirmation text for an accepted submission recorded on `date`.
pub fn confirmation_reply(submission: &TimeSubmission, date: NaiveDate) -> String {
    let mut lines = vec![
        date.format("%Y-%m-%d").to_string(),
        format!(
            "{} {}",
            title_case(&submission.first_name),
            title_case(&submission.last_name)
        ),
        format!("Start: {}", submission.start),
        format!("End: {}", submission.end),
    ];
    if submission.lunch_hours > Decimal::ZERO {
        lines.push(format!("Lunch hours: {}", submission.lunch_hours.normalize()));
    }
    if submission.extra_hours > Decimal::ZERO {
        lines.push(format!("Extra hours: {}", submission.extra_hours.normalize()));
    }
    if let Some(location) = &submission.location {
        lines.push(format!("Location: {location}"));
    }
    lines.push(format!("Hours: {:.2}", submission.hours()));

    lines.join("\n")
}

/// Capitalises the first letter of every word and lower-cases the rest.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::title_case;
///
/// assert_eq!(title_case("jOHN mcDonald"), "John Mcdonald");
/// ```
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
