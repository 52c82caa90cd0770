//! Clock-time token parsing.
//!
//! This module converts the start/end tokens of a text submission, such as
//! `7:30am`, `12:00pm`, or `4pm`, into an offset from midnight.

use serde::{Deserialize, Serialize};

use crate::error::{TimeEntryError, TimeSide};

/// An offset from local midnight, in whole minutes.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::{parse_clock_time, ClockTime};
/// use timecard_engine::error::TimeSide;
///
/// let time = parse_clock_time("1:30pm", TimeSide::Start).unwrap();
/// assert_eq!(time, ClockTime::from_minutes(13 * 60 + 30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Creates a clock time from minutes past midnight.
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Minutes past midnight.
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

/// Parses a 12-hour clock token into minutes past midnight.
///
/// Two shapes are accepted, case-insensitively:
///
/// - `H:MMam` / `HH:MMpm`: 6 or 7 characters, hour in 1..=12, two-digit
///   minutes in 0..=59.
/// - `Ham` / `HHpm`: 3 or 4 characters, hour in 1..=24, minutes implied 0.
///
/// `am` maps hour 12 to 0 and `pm` adds 12 to every hour except 12. A bare
/// token whose hour lands beyond 24 after that is rejected.
///
/// # Errors
///
/// Each malformed part maps to its own [`TimeEntryError`] kind, tagged with
/// `side` so callers can tell the start token from the end token.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::parse_clock_time;
/// use timecard_engine::error::{TimeEntryError, TimeSide};
///
/// assert_eq!(parse_clock_time("12am", TimeSide::Start).unwrap().minutes(), 0);
/// assert_eq!(parse_clock_time("11PM", TimeSide::End).unwrap().minutes(), 23 * 60);
/// assert!(matches!(
///     parse_clock_time("9:00", TimeSide::Start),
///     Err(TimeEntryError::TimeFormatInvalid { .. })
/// ));
/// ```
pub fn parse_clock_time(token: &str, side: TimeSide) -> Result<ClockTime, TimeEntryError> {
    let lowered = token.to_ascii_lowercase();

    let (hours, minutes) = match lowered.split_once(':') {
        Some((hour_part, rest)) => parse_colon_form(&lowered, hour_part, rest, token, side)?,
        None => (parse_bare_form(&lowered, token, side)?, 0),
    };

    Ok(ClockTime(hours * 60 + minutes))
}

fn parse_colon_form(
    lowered: &str,
    hour_part: &str,
    rest: &str,
    token: &str,
    side: TimeSide,
) -> Result<(u32, u32), TimeEntryError> {
    if !(6..=7).contains(&lowered.len()) {
        return Err(TimeEntryError::TimeFormatInvalid {
            side,
            token: token.to_string(),
        });
    }

    let hours = parse_digits(hour_part)
        .filter(|h| (1..=12).contains(h))
        .ok_or_else(|| TimeEntryError::HoursOutOfRange {
            side,
            token: token.to_string(),
        })?;

    let (minute_part, meridiem) = split_meridiem(rest).ok_or_else(|| {
        TimeEntryError::MeridiemInvalid {
            side,
            token: token.to_string(),
        }
    })?;

    let minutes = Some(minute_part)
        .filter(|m| m.len() == 2)
        .and_then(parse_digits)
        .filter(|m| *m <= 59)
        .ok_or_else(|| TimeEntryError::MinutesOutOfRange {
            side,
            token: token.to_string(),
        })?;

    Ok((meridiem.normalize(hours), minutes))
}

fn parse_bare_form(lowered: &str, token: &str, side: TimeSide) -> Result<u32, TimeEntryError> {
    if !(3..=4).contains(&lowered.len()) {
        return Err(TimeEntryError::TimeFormatInvalid {
            side,
            token: token.to_string(),
        });
    }

    let (hour_part, meridiem) =
        split_meridiem(lowered).ok_or_else(|| TimeEntryError::MeridiemInvalid {
            side,
            token: token.to_string(),
        })?;

    parse_digits(hour_part)
        .filter(|h| (1..=24).contains(h))
        .map(|h| meridiem.normalize(h))
        .filter(|h| *h <= 24)
        .ok_or_else(|| TimeEntryError::HoursOutOfRange {
            side,
            token: token.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn normalize(self, hours: u32) -> u32 {
        match (self, hours) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        }
    }
}

fn split_meridiem(s: &str) -> Option<(&str, Meridiem)> {
    if let Some(rest) = s.strip_suffix("am") {
        Some((rest, Meridiem::Am))
    } else {
        s.strip_suffix("pm").map(|rest| (rest, Meridiem::Pm))
    }
}

/// Parses one or two ASCII digits.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(token: &str) -> u32 {
        parse_clock_time(token, TimeSide::Start).unwrap().minutes()
    }

    fn error(token: &str) -> TimeEntryError {
        parse_clock_time(token, TimeSide::Start).unwrap_err()
    }

    #[test]
    fn test_colon_form_am_and_pm() {
        assert_eq!(minutes("9:00am"), 9 * 60);
        assert_eq!(minutes("1:30pm"), 13 * 60 + 30);
        assert_eq!(minutes("11:45pm"), 23 * 60 + 45);
    }

    #[test]
    fn test_bare_form_am_and_pm() {
        assert_eq!(minutes("9am"), 9 * 60);
        assert_eq!(minutes("2pm"), 14 * 60);
        assert_eq!(minutes("10am"), 10 * 60);
    }

    #[test]
    fn test_meridiem_normalization() {
        assert_eq!(minutes("12:00am"), 0);
        assert_eq!(minutes("12:00pm"), 12 * 60);
        assert_eq!(minutes("12am"), 0);
        assert_eq!(minutes("12pm"), 12 * 60);
        assert_eq!(minutes("1pm"), 13 * 60);
        assert_eq!(minutes("11pm"), 23 * 60);
    }

    #[test]
    fn test_meridiem_is_case_insensitive() {
        assert_eq!(minutes("9:15AM"), 9 * 60 + 15);
        assert_eq!(minutes("4Pm"), 16 * 60);
    }

    #[test]
    fn test_bare_form_accepts_24_hour_style_morning_values() {
        assert_eq!(minutes("13am"), 13 * 60);
        assert_eq!(minutes("24am"), 24 * 60);
    }

    #[test]
    fn test_bare_form_rejects_pm_beyond_end_of_day() {
        assert!(matches!(error("13pm"), TimeEntryError::HoursOutOfRange { .. }));
        assert!(matches!(error("25am"), TimeEntryError::HoursOutOfRange { .. }));
        assert!(matches!(error("0am"), TimeEntryError::HoursOutOfRange { .. }));
    }

    #[test]
    fn test_colon_form_wrong_length() {
        assert!(matches!(error("11:000am"), TimeEntryError::TimeFormatInvalid { .. }));
        assert!(matches!(error("9:00"), TimeEntryError::TimeFormatInvalid { .. }));
    }

    #[test]
    fn test_bare_form_wrong_length() {
        assert!(matches!(error("pm"), TimeEntryError::TimeFormatInvalid { .. }));
        assert!(matches!(error("100am"), TimeEntryError::TimeFormatInvalid { .. }));
    }

    #[test]
    fn test_colon_form_hours_out_of_range() {
        assert!(matches!(error("13:00pm"), TimeEntryError::HoursOutOfRange { .. }));
        assert!(matches!(error("0:30am"), TimeEntryError::HoursOutOfRange { .. }));
        assert!(matches!(error("x:30am"), TimeEntryError::HoursOutOfRange { .. }));
    }

    #[test]
    fn test_bare_form_non_numeric_hour() {
        assert!(matches!(error("xpm"), TimeEntryError::HoursOutOfRange { .. }));
    }

    #[test]
    fn test_missing_or_unknown_meridiem() {
        assert!(matches!(error("9:00xm"), TimeEntryError::MeridiemInvalid { .. }));
        assert!(matches!(error("900"), TimeEntryError::MeridiemInvalid { .. }));
    }

    #[test]
    fn test_minutes_out_of_range() {
        assert!(matches!(error("9:60am"), TimeEntryError::MinutesOutOfRange { .. }));
        assert!(matches!(error("10:5pm"), TimeEntryError::MinutesOutOfRange { .. }));
        assert!(matches!(error("9:a0am"), TimeEntryError::MinutesOutOfRange { .. }));
    }

    #[test]
    fn test_error_carries_side_and_original_token() {
        let err = parse_clock_time("9:60AM", TimeSide::End).unwrap_err();
        assert_eq!(
            err,
            TimeEntryError::MinutesOutOfRange {
                side: TimeSide::End,
                token: "9:60AM".to_string(),
            }
        );
    }
}
