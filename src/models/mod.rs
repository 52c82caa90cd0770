//! Core data models for the Timecard Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod ledger;
mod pay_period;
mod time_entry;

pub use ledger::{DayEntry, EmployeeId, Ledger, PayrollEntry};
pub use pay_period::{PERIOD_LENGTH_DAYS, PayPeriod, PeriodAlignment};
pub use time_entry::{TimeEntry, TimeSubmission};
