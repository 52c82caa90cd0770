//! Time card assembly and payroll totals.
//!
//! This module groups the flat list of recorded hours for a pay period into
//! one [`Ledger`] per employee and totals them into a [`PayrollSummary`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PeriodError;
use crate::models::{EmployeeId, Ledger, PayPeriod, PayrollEntry};

use super::command::title_case;
use super::hours::round_hours;

/// An entry that could not be added to its employee's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedEntry {
    /// The entry as received.
    pub entry: PayrollEntry,
    /// Why it was rejected.
    pub reason: String,
    #[serde(skip)]
    error: PeriodError,
}

impl RejectedEntry {
    /// The ledger error that rejected the entry.
    pub fn error(&self) -> &PeriodError {
        &self.error
    }
}

/// The ledgers built for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeCardBatch {
    /// The period the ledgers cover.
    pub period: PayPeriod,
    /// One ledger per employee, ordered by employee id.
    pub ledgers: Vec<Ledger>,
    /// Entries that were skipped.
    pub rejected: Vec<RejectedEntry>,
}

/// Builds one ledger per employee from a flat list of entries.
///
/// Employees appear in ascending id order. Names from `names` are
/// title-cased onto the ledgers. An entry that a ledger rejects, such as a
/// date outside the period or negative hours, is logged and returned in
/// [`TimeCardBatch::rejected`] while the rest of the run continues.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use timecard_engine::calculation::build_ledgers;
/// use timecard_engine::models::{PayPeriod, PayrollEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::starting(NaiveDate::from_ymd_opt(2025, 12, 7).unwrap())?;
/// let entries = vec![PayrollEntry {
///     employee_id: 3,
///     date: NaiveDate::from_ymd_opt(2025, 12, 8).unwrap(),
///     hours: Decimal::new(8, 0),
///     label: None,
/// }];
///
/// let batch = build_ledgers(&period, &entries, &HashMap::new());
/// assert_eq!(batch.ledgers.len(), 1);
/// assert_eq!(batch.ledgers[0].total_hours(), Decimal::new(8, 0));
/// # Ok::<(), timecard_engine::error::PeriodError>(())
/// ```
pub fn build_ledgers(
    period: &PayPeriod,
    entries: &[PayrollEntry],
    names: &HashMap<EmployeeId, String>,
) -> TimeCardBatch {
    let mut ledgers: BTreeMap<EmployeeId, Ledger> = BTreeMap::new();
    let mut rejected = Vec::new();

    for entry in entries {
        let ledger = ledgers.entry(entry.employee_id).or_insert_with(|| {
            let ledger = Ledger::for_period(entry.employee_id, period);
            match names.get(&entry.employee_id) {
                Some(name) => ledger.with_name(title_case(name)),
                None => ledger,
            }
        });

        if let Err(error) = ledger.add_hours(entry.date, entry.hours, entry.label.as_deref()) {
            warn!(
                employee_id = entry.employee_id,
                date = %entry.date,
                hours = %entry.hours,
                error = %error,
                "Skipping time card entry"
            );
            rejected.push(RejectedEntry {
                entry: entry.clone(),
                reason: error.to_string(),
                error,
            });
        }
    }

    debug!(
        start = %period.start_date(),
        end = %period.end_date(),
        employees = ledgers.len(),
        rejected = rejected.len(),
        "Built time cards"
    );

    TimeCardBatch {
        period: *period,
        ledgers: ledgers.into_values().collect(),
        rejected,
    }
}

/// One employee's line in the payroll summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Display name (falls back to `Employee #<id>`).
    pub name: String,
    /// Hours for the period.
    pub total_hours: Decimal,
}

/// Payroll totals for a pay period, sent to the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollSummary {
    /// The period summarised.
    pub period: PayPeriod,
    /// Per-employee totals, ordered by employee id.
    pub lines: Vec<SummaryLine>,
    /// Sum of all employee hours.
    pub total_hours: Decimal,
    /// Total hours multiplied by the hourly wage, rounded to cents.
    pub estimated_cost: Decimal,
}

/// Totals a batch of ledgers at the given hourly wage.
///
/// Returns [`PeriodError::HoursOverflow`], dated at the end of the period,
/// when the combined hours or their cost cannot be represented.
pub fn summarize_payroll(
    batch: &TimeCardBatch,
    hourly_wage: Decimal,
) -> Result<PayrollSummary, PeriodError> {
    let lines: Vec<SummaryLine> = batch
        .ledgers
        .iter()
        .map(|ledger| SummaryLine {
            employee_id: ledger.employee_id(),
            name: ledger
                .name()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Employee #{}", ledger.employee_id())),
            total_hours: ledger.total_hours(),
        })
        .collect();

    let date = batch.period.end_date();
    let total_hours = lines.iter().try_fold(Decimal::ZERO, |sum, line| {
        sum.checked_add(line.total_hours)
            .ok_or(PeriodError::HoursOverflow {
                date,
                hours: line.total_hours,
            })
    })?;
    let total_hours = round_hours(total_hours);
    let estimated_cost = total_hours
        .checked_mul(hourly_wage)
        .ok_or(PeriodError::HoursOverflow {
            date,
            hours: total_hours,
        })?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(PayrollSummary {
        period: batch.period,
        lines,
        total_hours,
        estimated_cost,
    })
}

impl fmt::Display for PayrollSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Pay period: {}  <->  {}",
            self.period.start_date().format("%Y-%m-%d"),
            self.period.end_date().format("%Y-%m-%d")
        )?;
        writeln!(f, "Payday: {}\n", self.period.pay_date().format("%Y-%m-%d"))?;

        for line in &self.lines {
            writeln!(f, "{}  -->  {:.2}", line.name, line.total_hours)?;
        }

        writeln!(f, "\nTotal Hours  -->  {:.2}", self.total_hours)?;
        writeln!(f, "Estimated Total Cost  -->  ${:.2}", self.estimated_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(employee_id: EmployeeId, day: u32, hours: &str) -> PayrollEntry {
        PayrollEntry {
            employee_id,
            date: date(2025, 12, day),
            hours: dec(hours),
            label: None,
        }
    }

    fn period() -> PayPeriod {
        PayPeriod::starting(date(2025, 12, 7)).unwrap()
    }

    #[test]
    fn test_groups_entries_by_employee_in_id_order() {
        let entries = vec![entry(9, 8, "8"), entry(2, 8, "6"), entry(9, 9, "7.5")];
        let batch = build_ledgers(&period(), &entries, &HashMap::new());

        let ids: Vec<EmployeeId> = batch.ledgers.iter().map(|l| l.employee_id()).collect();
        assert_eq!(ids, vec![2, 9]);
        assert_eq!(batch.ledgers[1].total_hours(), dec("15.5"));
        assert!(batch.rejected.is_empty());
    }

    #[test]
    fn test_out_of_period_entry_is_rejected_but_run_continues() {
        let entries = vec![entry(1, 6, "8"), entry(1, 8, "8"), entry(1, 14, "4")];
        let batch = build_ledgers(&period(), &entries, &HashMap::new());

        assert_eq!(batch.ledgers.len(), 1);
        assert_eq!(batch.ledgers[0].total_hours(), dec("8"));
        assert_eq!(batch.rejected.len(), 2);
        assert!(matches!(
            batch.rejected[0].error(),
            PeriodError::DateNotInPeriod { .. }
        ));
    }

    #[test]
    fn test_negative_entry_is_rejected() {
        let batch = build_ledgers(&period(), &[entry(1, 8, "-2")], &HashMap::new());
        assert_eq!(batch.ledgers[0].total_hours(), Decimal::ZERO);
        assert!(matches!(
            batch.rejected[0].error(),
            PeriodError::NegativeHours { .. }
        ));
    }

    #[test]
    fn test_overflowing_entry_is_rejected_but_run_continues() {
        let max = Decimal::MAX.to_string();
        let entries = vec![entry(1, 8, &max), entry(1, 9, &max), entry(2, 8, "8")];
        let batch = build_ledgers(&period(), &entries, &HashMap::new());

        assert_eq!(batch.ledgers.len(), 2);
        assert_eq!(batch.ledgers[0].total_hours(), Decimal::MAX);
        assert_eq!(batch.ledgers[1].total_hours(), dec("8"));
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].entry.date, date(2025, 12, 9));
        assert!(matches!(
            batch.rejected[0].error(),
            PeriodError::HoursOverflow { .. }
        ));
    }

    #[test]
    fn test_names_are_title_cased() {
        let names = HashMap::from([(4, "jane DOE".to_string())]);
        let batch = build_ledgers(&period(), &[entry(4, 10, "5")], &names);
        assert_eq!(batch.ledgers[0].name(), Some("Jane Doe"));
    }

    #[test]
    fn test_empty_entries_produce_empty_batch() {
        let batch = build_ledgers(&period(), &[], &HashMap::new());
        assert!(batch.ledgers.is_empty());
        assert_eq!(batch.period, period());
    }

    #[test]
    fn test_summary_totals_and_cost() {
        let names = HashMap::from([(1, "john smith".to_string())]);
        let entries = vec![entry(1, 8, "8"), entry(1, 9, "7.25"), entry(2, 10, "4.5")];
        let batch = build_ledgers(&period(), &entries, &names);

        let summary = summarize_payroll(&batch, dec("30")).unwrap();
        assert_eq!(summary.total_hours, dec("19.75"));
        assert_eq!(summary.estimated_cost, dec("592.50"));
        assert_eq!(summary.lines[0].name, "John Smith");
        assert_eq!(summary.lines[1].name, "Employee #2");
    }

    #[test]
    fn test_summary_hours_overflow_is_an_error() {
        let max = Decimal::MAX.to_string();
        let entries = vec![entry(1, 8, &max), entry(2, 8, &max)];
        let batch = build_ledgers(&period(), &entries, &HashMap::new());
        assert!(batch.rejected.is_empty());

        assert_eq!(
            summarize_payroll(&batch, dec("30")),
            Err(PeriodError::HoursOverflow {
                date: date(2025, 12, 13),
                hours: Decimal::MAX,
            })
        );
    }

    #[test]
    fn test_summary_cost_overflow_is_an_error() {
        let max = Decimal::MAX.to_string();
        let batch = build_ledgers(&period(), &[entry(1, 8, &max)], &HashMap::new());
        assert!(matches!(
            summarize_payroll(&batch, dec("30")),
            Err(PeriodError::HoursOverflow { .. })
        ));
    }

    #[test]
    fn test_summary_renders_plain_text() {
        let names = HashMap::from([(1, "john smith".to_string())]);
        let batch = build_ledgers(&period(), &[entry(1, 8, "8")], &names);
        let text = summarize_payroll(&batch, dec("30")).unwrap().to_string();

        assert!(text.starts_with("Pay period: 2025-12-07  <->  2025-12-13\n"));
        assert!(text.contains("Payday: 2025-12-26"));
        assert!(text.contains("John Smith  -->  8.00"));
        assert!(text.contains("Total Hours  -->  8.00"));
        assert!(text.contains("Estimated Total Cost  -->  $240.00"));
    }
}
