//! Pay-period boundary and payday calculations.
//!
//! All boundary math works on the local calendar date in the payroll
//! timezone. An instant is first converted into that timezone and reduced
//! to its year/month/day before any weekday arithmetic, so the time of day
//! never moves a boundary.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::PeriodError;
use crate::models::{PERIOD_LENGTH_DAYS, PayPeriod, PeriodAlignment};

/// Resolves an IANA timezone name such as `America/Denver`.
pub fn resolve_timezone(name: &str) -> Result<Tz, PeriodError> {
    name.parse::<Tz>().map_err(|_| PeriodError::InvalidTimezone {
        name: name.to_string(),
    })
}

/// The calendar date of `now` as seen on a wall clock in `timezone`.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::local_date;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// // 03:30 UTC on Dec 15 is still the evening of Dec 14 in Denver.
/// let now = Utc.with_ymd_and_hms(2025, 12, 15, 3, 30, 0).unwrap();
/// assert_eq!(
///     local_date(now, chrono_tz::America::Denver),
///     NaiveDate::from_ymd_opt(2025, 12, 14).unwrap()
/// );
/// ```
pub fn local_date(now: DateTime<Utc>, timezone: Tz) -> NaiveDate {
    let local = now.with_timezone(&timezone);
    // Rebuild from the local components rather than truncating the instant.
    NaiveDate::from_ymd_opt(local.year(), local.month(), local.day())
        .unwrap_or_else(|| local.date_naive())
}

/// The most recent period-start day on or before `today`.
pub fn current_period_start(
    today: NaiveDate,
    alignment: PeriodAlignment,
) -> Result<NaiveDate, PeriodError> {
    let days_back = match alignment {
        PeriodAlignment::Sunday => today.weekday().num_days_from_sunday(),
        PeriodAlignment::Monday => today.weekday().num_days_from_monday(),
    };
    today
        .checked_sub_days(Days::new(u64::from(days_back)))
        .ok_or(PeriodError::DateOutOfRange { date: today })
}

/// The most recently completed pay period relative to `today`.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::last_completed_period;
/// use timecard_engine::models::PeriodAlignment;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
///
/// let sunday_aligned = last_completed_period(monday, PeriodAlignment::Sunday)?;
/// assert_eq!(sunday_aligned.start_date(), NaiveDate::from_ymd_opt(2025, 12, 7).unwrap());
/// assert_eq!(sunday_aligned.end_date(), NaiveDate::from_ymd_opt(2025, 12, 13).unwrap());
///
/// let monday_aligned = last_completed_period(monday, PeriodAlignment::Monday)?;
/// assert_eq!(monday_aligned.start_date(), NaiveDate::from_ymd_opt(2025, 12, 8).unwrap());
/// assert_eq!(monday_aligned.end_date(), NaiveDate::from_ymd_opt(2025, 12, 14).unwrap());
/// # Ok::<(), timecard_engine::error::PeriodError>(())
/// ```
pub fn last_completed_period(
    today: NaiveDate,
    alignment: PeriodAlignment,
) -> Result<PayPeriod, PeriodError> {
    let start = current_period_start(today, alignment)?
        .checked_sub_days(Days::new(PERIOD_LENGTH_DAYS + 1))
        .ok_or(PeriodError::DateOutOfRange { date: today })?;
    PayPeriod::starting(start)
}

/// The most recently completed pay period for the instant `now`, as seen in
/// the named timezone.
///
/// Returns [`PeriodError::InvalidTimezone`] for an unknown zone name.
pub fn last_week_dates(
    now: DateTime<Utc>,
    timezone: &str,
    alignment: PeriodAlignment,
) -> Result<PayPeriod, PeriodError> {
    let tz = resolve_timezone(timezone)?;
    last_completed_period(local_date(now, tz), alignment)
}

/// The seven-day period immediately following a previously recorded end
/// date, regardless of alignment.
pub fn next_period(last_end: NaiveDate) -> Result<PayPeriod, PeriodError> {
    let start = last_end
        .checked_add_days(Days::new(1))
        .ok_or(PeriodError::DateOutOfRange { date: last_end })?;
    PayPeriod::starting(start)
}

/// Payday for a period ending on `end_date`: the second Friday after it.
///
/// The first Friday is taken strictly after `end_date`, so a Friday end
/// date pushes the first Friday a full week out. Payday is always a Friday
/// between 8 and 14 days after `end_date`. Returns
/// [`PeriodError::DateOutOfRange`] when that Friday is past the last
/// representable date.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::compute_payday;
/// use chrono::NaiveDate;
///
/// let end = NaiveDate::from_ymd_opt(2025, 12, 14).unwrap();
/// assert_eq!(compute_payday(end)?, NaiveDate::from_ymd_opt(2025, 12, 26).unwrap());
/// # Ok::<(), timecard_engine::error::PeriodError>(())
/// ```
pub fn compute_payday(end_date: NaiveDate) -> Result<NaiveDate, PeriodError> {
    let from_end = end_date.weekday().num_days_from_monday();
    let friday = Weekday::Fri.num_days_from_monday();
    let days_until_friday = match (friday + 7 - from_end) % 7 {
        0 => 7,
        days => days,
    };
    end_date
        .checked_add_days(Days::new(u64::from(days_until_friday) + 7))
        .ok_or(PeriodError::DateOutOfRange { date: end_date })
}

/// How the window for a time card run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSelection {
    /// The seven days starting on the given date.
    StartingOn(NaiveDate),
    /// The seven days after a previously recorded period end.
    ContinueFrom(NaiveDate),
    /// The last completed period as of `now` in `timezone`.
    LastCompleted {
        /// Reference instant.
        now: DateTime<Utc>,
        /// Payroll timezone.
        timezone: Tz,
        /// Period alignment.
        alignment: PeriodAlignment,
    },
}

impl PeriodSelection {
    /// Resolves the selection to a concrete pay period.
    ///
    /// Fails with [`PeriodError::DateOutOfRange`] when the period would run
    /// past the supported calendar.
    pub fn resolve(&self) -> Result<PayPeriod, PeriodError> {
        match *self {
            PeriodSelection::StartingOn(start) => PayPeriod::starting(start),
            PeriodSelection::ContinueFrom(last_end) => next_period(last_end),
            PeriodSelection::LastCompleted {
                now,
                timezone,
                alignment,
            } => last_completed_period(local_date(now, timezone), alignment),
        }
    }

    /// Short name of the selection mode, for logs and responses.
    pub fn mode(&self) -> SelectionMode {
        match self {
            PeriodSelection::StartingOn(_) => SelectionMode::Explicit,
            PeriodSelection::ContinueFrom(_) => SelectionMode::Continuation,
            PeriodSelection::LastCompleted { .. } => SelectionMode::LastCompleted,
        }
    }
}

/// The mode a [`PeriodSelection`] was made in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Caller supplied the start date.
    Explicit,
    /// Derived from the stored end of the previous run.
    Continuation,
    /// Derived from the current date.
    LastCompleted,
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::Explicit => write!(f, "explicit"),
            SelectionMode::Continuation => write!(f, "continuation"),
            SelectionMode::LastCompleted => write!(f, "last_completed"),
        }
    }
}
