//! Calculation logic for the Timecard Engine.
//!
//! This module contains the text-message time parser and hours calculator,
//! pay-period boundary and payday date arithmetic, and the assembly of
//! per-employee time cards and payroll totals.

mod clock_time;
mod command;
mod hours;
mod pay_period;
mod timecards;

pub use clock_time::{ClockTime, parse_clock_time};
pub use command::{
    HELP_REPLY, MAX_FIELDS, MIN_FIELDS, MessageKind, classify_message, confirmation_reply,
    extract_location, parse_submission, rejection_reply, title_case,
};
pub use hours::{HOURS_DECIMAL_PLACES, calculate_time, round_hours};
pub use pay_period::{
    PeriodSelection, SelectionMode, compute_payday, current_period_start, last_completed_period,
    last_week_dates, local_date, next_period, resolve_timezone,
};
pub use timecards::{
    PayrollSummary, RejectedEntry, SummaryLine, TimeCardBatch, build_ledgers, summarize_payroll,
};
