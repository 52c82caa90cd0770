//! Pay period models.
//!
//! This module contains the [`PayPeriod`] window and the [`PeriodAlignment`]
//! choice that decides which weekday a period starts on.

use chrono::{Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calculation::compute_payday;
use crate::error::PeriodError;

/// Number of days after the start date that a weekly period ends.
pub const PERIOD_LENGTH_DAYS: u64 = 6;

/// Which weekday a weekly pay period starts on.
///
/// Both alignments have been used for payroll, so callers choose one
/// explicitly through configuration.
///
/// # Example
///
/// ```
/// use timecard_engine::models::PeriodAlignment;
/// use chrono::Weekday;
///
/// assert_eq!(PeriodAlignment::Sunday.first_day(), Weekday::Sun);
/// assert_eq!(PeriodAlignment::Monday.last_day(), Weekday::Sun);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodAlignment {
    /// Sunday through Saturday.
    #[default]
    Sunday,
    /// Monday through Sunday.
    Monday,
}

impl PeriodAlignment {
    /// First weekday of a period under this alignment.
    pub fn first_day(self) -> Weekday {
        match self {
            PeriodAlignment::Sunday => Weekday::Sun,
            PeriodAlignment::Monday => Weekday::Mon,
        }
    }

    /// Last weekday of a period under this alignment.
    pub fn last_day(self) -> Weekday {
        match self {
            PeriodAlignment::Sunday => Weekday::Sat,
            PeriodAlignment::Monday => Weekday::Sun,
        }
    }
}

impl std::fmt::Display for PeriodAlignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodAlignment::Sunday => write!(f, "sunday"),
            PeriodAlignment::Monday => write!(f, "monday"),
        }
    }
}

/// A seven-day pay period and its payday.
///
/// `end_date` is always `start_date + 6 days` and `pay_date` is derived from
/// `end_date`, so the only way to build one is [`PayPeriod::starting`].
///
/// # Example
///
/// ```
/// use timecard_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::starting(NaiveDate::from_ymd_opt(2025, 12, 8).unwrap())?;
///
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2025, 12, 14).unwrap());
/// assert_eq!(period.pay_date(), NaiveDate::from_ymd_opt(2025, 12, 26).unwrap());
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2025, 12, 10).unwrap()));
/// # Ok::<(), timecard_engine::error::PeriodError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PayPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
    pay_date: NaiveDate,
}

impl PayPeriod {
    /// Builds the seven-day period that begins on `start_date`.
    ///
    /// Returns [`PeriodError::DateOutOfRange`] when the end date or payday
    /// would fall past the last representable date.
    pub fn starting(start_date: NaiveDate) -> Result<Self, PeriodError> {
        let end_date = start_date
            .checked_add_days(Days::new(PERIOD_LENGTH_DAYS))
            .ok_or(PeriodError::DateOutOfRange { date: start_date })?;
        Ok(Self {
            start_date,
            end_date,
            pay_date: compute_payday(end_date)?,
        })
    }

    /// First day of the period (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the period (inclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// The Friday payroll for this period is issued on.
    pub fn pay_date(&self) -> NaiveDate {
        self.pay_date
    }

    /// Checks if a given date falls within this pay period, inclusive of
    /// both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every calendar day of the period in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date.iter_days().take_while(|d| *d <= self.end_date)
    }
}
