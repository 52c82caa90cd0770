//! Ledger (time card) models.
//!
//! A [`Ledger`] holds one employee's hours for every day of a pay period.
//! It renders as the plain-text time card that is emailed to the employee.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{compute_payday, round_hours};
use crate::error::PeriodError;

use super::PayPeriod;

/// Identifier of an employee in the persistence collaborator.
pub type EmployeeId = i64;

/// One row of the persistence collaborator's range read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// The employee the hours belong to.
    pub employee_id: EmployeeId,
    /// The day the hours were worked.
    pub date: NaiveDate,
    /// Hours recorded for that day.
    pub hours: Decimal,
    /// Optional job location.
    #[serde(default)]
    pub label: Option<String>,
}

/// Hours and job label for a single day of a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// Hours worked that day.
    pub hours: Decimal,
    /// The most recent non-empty job label recorded for the day.
    pub label: Option<String>,
}

/// One employee's hours over an inclusive date range.
///
/// # Example
///
/// ```
/// use timecard_engine::models::Ledger;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2025, 12, 7).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 12, 13).unwrap();
/// let mut ledger = Ledger::new(42, start, end)?;
///
/// ledger.add_hours(start, Decimal::new(75, 1), Some("Main St"))?;
/// ledger.add_hours(start, Decimal::new(5, 1), None)?;
///
/// assert_eq!(ledger.total_hours(), Decimal::new(80, 1));
/// assert_eq!(ledger.day(start).unwrap().label.as_deref(), Some("Main St"));
/// # Ok::<(), timecard_engine::error::PeriodError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ledger {
    employee_id: EmployeeId,
    name: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
    pay_date: NaiveDate,
    days: BTreeMap<NaiveDate, DayEntry>,
    total_hours: Decimal,
}

impl Ledger {
    /// Creates an empty ledger with a zero-hour slot for every day of
    /// `[start, end]`.
    ///
    /// Returns [`PeriodError::InvalidDateRange`] when `end` is before `start`
    /// and [`PeriodError::DateOutOfRange`] when the payday for `end` cannot
    /// be represented.
    pub fn new(
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, PeriodError> {
        if end < start {
            return Err(PeriodError::InvalidDateRange { start, end });
        }
        Ok(Self::zeroed(employee_id, start, end, compute_payday(end)?))
    }

    /// Creates an empty ledger covering a pay period.
    pub fn for_period(employee_id: EmployeeId, period: &PayPeriod) -> Self {
        Self::zeroed(
            employee_id,
            period.start_date(),
            period.end_date(),
            period.pay_date(),
        )
    }

    fn zeroed(
        employee_id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
        pay_date: NaiveDate,
    ) -> Self {
        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| (d, DayEntry::default()))
            .collect();

        Self {
            employee_id,
            name: None,
            start_date: start,
            end_date: end,
            pay_date,
            days,
            total_hours: Decimal::ZERO,
        }
    }

    /// Sets the display name used when rendering.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds hours worked on `date`.
    ///
    /// Hours accumulate onto the day; a non-empty `label` replaces the
    /// day's label. Negative hours, dates outside the ledger, and hours
    /// that would overflow the day or ledger total are rejected without
    /// changing anything.
    pub fn add_hours(
        &mut self,
        date: NaiveDate,
        hours: Decimal,
        label: Option<&str>,
    ) -> Result<(), PeriodError> {
        if hours < Decimal::ZERO {
            return Err(PeriodError::NegativeHours { hours });
        }

        let Some(entry) = self.days.get_mut(&date) else {
            return Err(PeriodError::DateNotInPeriod {
                date,
                start: self.start_date,
                end: self.end_date,
            });
        };

        let hours = round_hours(hours);
        let overflow = PeriodError::HoursOverflow { date, hours };
        let day_hours = entry.hours.checked_add(hours).ok_or(overflow.clone())?;
        let total_hours = self.total_hours.checked_add(hours).ok_or(overflow)?;

        entry.hours = day_hours;
        if let Some(label) = label.map(str::trim).filter(|l| !l.is_empty()) {
            entry.label = Some(label.to_string());
        }
        self.total_hours = round_hours(total_hours);
        Ok(())
    }

    /// The employee this ledger belongs to.
    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// The display name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// First day of the ledger.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the ledger.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Payday for the ledger's period.
    pub fn pay_date(&self) -> NaiveDate {
        self.pay_date
    }

    /// The entry for a single day, if the day is in the ledger.
    pub fn day(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.days.get(&date)
    }

    /// All days in date order.
    pub fn days(&self) -> &BTreeMap<NaiveDate, DayEntry> {
        &self.days
    }

    /// Sum of all day hours, rounded to 2 decimal places.
    pub fn total_hours(&self) -> Decimal {
        self.total_hours
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(f, "{name}\n\n")?,
            None => writeln!(f, "Employee #{}\n\n", self.employee_id)?,
        }

        writeln!(f, "{:>11}|{:>5}|{:>6}|Job Name", "Date", "Day", "Hours")?;
        writeln!(
            f,
            "{}+{}+{}+{}",
            "-".repeat(11),
            "-".repeat(5),
            "-".repeat(6),
            "-".repeat(20)
        )?;

        for (date, entry) in &self.days {
            let hours = format!("{:.2}", entry.hours);
            let label = entry.label.as_deref().unwrap_or("-");
            writeln!(
                f,
                "{:>10} | {:>4}| {:>5}| {}",
                date.format("%Y-%m-%d").to_string(),
                date.format("%a").to_string(),
                hours,
                label
            )?;
        }

        writeln!(f, "\n")?;
        writeln!(f, "Total hours:  {:.2}", self.total_hours)?;
        writeln!(f, "Payday:  {}", self.pay_date.format("%Y-%m-%d"))
    }
}
