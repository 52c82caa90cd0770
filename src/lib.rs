//! Timecard Engine for text-message time tracking
//!
//! This crate parses time submissions sent by text message (for example
//! `time john smith 7:00am 3:30pm 0.5 "Main St"`) into worked hours, works
//! out weekly pay periods and their Friday paydays, and assembles the time
//! cards and payroll totals sent out at the end of each period.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
