//! Worked-hours calculation.
//!
//! This module turns the start, end, lunch, and extra fields of a time
//! submission into a rounded number of hours.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{TimeEntryError, TimeSide};
use crate::models::TimeEntry;

use super::clock_time::parse_clock_time;

/// Decimal places kept for every hour value.
pub const HOURS_DECIMAL_PLACES: u32 = 2;

/// Rounds hours to 2 decimal places, midpoints away from zero.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_hours(Decimal::new(1005, 3)), Decimal::new(101, 2));
/// assert_eq!(round_hours(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a lunch or extra hours field.
///
/// Accepts plain decimals (`1`, `0.5`, `-1`) and scientific notation
/// (`5e-1`). Sign is not checked here. Digit separators such as `1_0`
/// are rejected.
pub(crate) fn parse_hours_field(value: &str) -> Option<Decimal> {
    let value = value.trim();
    if !value
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Calculates hours worked from the raw fields of a time submission.
///
/// Hours are `(end - start) - lunch + extra`, rounded to 2 decimal places.
/// Shifts cannot wrap past midnight, so `end` must not be earlier than
/// `start`. Negative lunch or extra values are applied as given.
///
/// # Errors
///
/// Returns the [`TimeEntryError`] of the first field that fails, in the
/// order start, end, end-before-start, lunch, extra. A lunch or extra value
/// too large to apply is reported as a format error on that field.
///
/// # Examples
///
/// ```
/// use timecard_engine::calculation::calculate_time;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let entry = calculate_time("9:00am", "5:00pm", "1", "0").unwrap();
/// assert_eq!(entry.duration_hours, Decimal::from_str("7").unwrap());
///
/// let entry = calculate_time("8am", "4pm", "0.5", "0").unwrap();
/// assert_eq!(entry.duration_hours, Decimal::from_str("7.5").unwrap());
/// ```
pub fn calculate_time(
    start: &str,
    end: &str,
    lunch: &str,
    extra: &str,
) -> Result<TimeEntry, TimeEntryError> {
    let start_time = parse_clock_time(start, TimeSide::Start)?;
    let end_time = parse_clock_time(end, TimeSide::End)?;

    if end_time < start_time {
        return Err(TimeEntryError::EndBeforeStart {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let lunch_hours =
        parse_hours_field(lunch).ok_or_else(|| TimeEntryError::LunchFormatInvalid {
            value: lunch.to_string(),
        })?;
    let extra_hours =
        parse_hours_field(extra).ok_or_else(|| TimeEntryError::ExtraFormatInvalid {
            value: extra.to_string(),
        })?;

    let worked_minutes = Decimal::from(end_time.minutes() - start_time.minutes());
    let shift_hours = worked_minutes / Decimal::from(60);

    let after_lunch = shift_hours.checked_sub(lunch_hours).ok_or_else(|| {
        TimeEntryError::LunchFormatInvalid {
            value: lunch.to_string(),
        }
    })?;
    let total = after_lunch.checked_add(extra_hours).ok_or_else(|| {
        TimeEntryError::ExtraFormatInvalid {
            value: extra.to_string(),
        }
    })?;

    Ok(TimeEntry {
        duration_hours: round_hours(total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hours(start: &str, end: &str, lunch: &str, extra: &str) -> Decimal {
        calculate_time(start, end, lunch, extra)
            .unwrap()
            .duration_hours
    }

    #[test]
    fn test_standard_workday_with_lunch() {
        assert_eq!(hours("9:00am", "5:00pm", "1", "0"), dec("7"));
    }

    #[test]
    fn test_short_format_with_half_hour_lunch() {
        assert_eq!(hours("8am", "4pm", "0.5", "0"), dec("7.5"));
    }

    #[test]
    fn test_extra_hours_are_added() {
        assert_eq!(hours("7:00am", "3:30pm", "0.5", "2"), dec("10"));
    }

    #[test]
    fn test_fractional_minutes_round_to_two_places() {
        // 7:00am to 3:20pm is 8h20m = 8.3333...
        assert_eq!(hours("7:00am", "3:20pm", "0", "0"), dec("8.33"));
        // 10 minutes is 0.1666...
        assert_eq!(hours("9:00am", "9:10am", "0", "0"), dec("0.17"));
    }

    #[test]
    fn test_same_start_and_end_is_zero() {
        assert_eq!(hours("12:00pm", "12pm", "0", "0"), dec("0"));
    }

    #[test]
    fn test_end_before_start() {
        let err = calculate_time("5:00pm", "9:00am", "1", "0").unwrap_err();
        assert!(matches!(err, TimeEntryError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_end_before_start_wins_over_bad_lunch() {
        let err = calculate_time("5:00pm", "9:00am", "abc", "0").unwrap_err();
        assert!(matches!(err, TimeEntryError::EndBeforeStart { .. }));
    }

    #[test]
    fn test_lunch_format_invalid() {
        let err = calculate_time("9am", "5pm", "one", "0").unwrap_err();
        assert_eq!(
            err,
            TimeEntryError::LunchFormatInvalid {
                value: "one".to_string()
            }
        );
    }

    #[test]
    fn test_extra_format_invalid() {
        let err = calculate_time("9am", "5pm", "1", "2h").unwrap_err();
        assert_eq!(
            err,
            TimeEntryError::ExtraFormatInvalid {
                value: "2h".to_string()
            }
        );
    }

    #[test]
    fn test_negative_lunch_is_applied() {
        assert_eq!(hours("9am", "5pm", "-1", "0"), dec("9"));
    }

    #[test]
    fn test_scientific_notation_field() {
        assert_eq!(hours("9am", "5pm", "5e-1", "0"), dec("7.5"));
    }

    #[test]
    fn test_start_token_error_reports_start_side() {
        let err = calculate_time("13:00pm", "5pm", "0", "0").unwrap_err();
        assert!(matches!(
            err,
            TimeEntryError::HoursOutOfRange {
                side: TimeSide::Start,
                ..
            }
        ));
    }

    #[test]
    fn test_end_token_error_reports_end_side() {
        let err = calculate_time("9am", "5:00", "0", "0").unwrap_err();
        assert!(matches!(
            err,
            TimeEntryError::TimeFormatInvalid {
                side: TimeSide::End,
                ..
            }
        ));
    }

    #[test]
    fn test_round_hours_midpoint_away_from_zero() {
        assert_eq!(round_hours(dec("2.345")), dec("2.35"));
        assert_eq!(round_hours(dec("2.344")), dec("2.34"));
        assert_eq!(round_hours(dec("-2.345")), dec("-2.35"));
    }

    #[test]
    fn test_parse_hours_field() {
        assert_eq!(parse_hours_field("0.5"), Some(dec("0.5")));
        assert_eq!(parse_hours_field("1"), Some(dec("1")));
        assert_eq!(parse_hours_field("lunch"), None);
        assert_eq!(parse_hours_field(""), None);
        assert_eq!(parse_hours_field("1_0"), None);
        assert_eq!(parse_hours_field("inf"), None);
        assert_eq!(parse_hours_field("-2"), Some(dec("-2")));
    }

    #[test]
    fn test_digit_separator_in_lunch_is_rejected() {
        let err = calculate_time("9am", "11pm", "1_0", "0").unwrap_err();
        assert_eq!(
            err,
            TimeEntryError::LunchFormatInvalid {
                value: "1_0".to_string()
            }
        );
    }

    #[test]
    fn test_lunch_too_large_to_apply_is_rejected() {
        let err = calculate_time("9am", "5pm", "-79228162514264337593543950335", "0").unwrap_err();
        assert!(matches!(err, TimeEntryError::LunchFormatInvalid { .. }));
    }

    #[test]
    fn test_extra_too_large_to_apply_is_rejected() {
        let err = calculate_time("9am", "5pm", "0", "79228162514264337593543950335").unwrap_err();
        assert!(matches!(err, TimeEntryError::ExtraFormatInvalid { .. }));
    }
}
