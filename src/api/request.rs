//! Request types for the Timecard Engine API.
//!
//! This module defines the JSON request structures for the `/messages` and
//! `/timecards` endpoints.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EmployeeId, PayrollEntry};

/// Request body for the `/messages` endpoint.
///
/// Forwarded by the messaging gateway for every inbound text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    /// The message text.
    pub body: String,
    /// The sender's phone number.
    pub from: String,
    /// When the message arrived. Defaults to the time the request is handled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
}

/// Request body for the `/timecards` endpoint.
///
/// The pay period is chosen in this order: an explicit `start_date`, then
/// the period after the recorded one when `continue_from_last` is set, then
/// the most recently completed period relative to `now`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeCardRequest {
    /// First day of the period to send.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Send the seven days after the last period sent.
    #[serde(default)]
    pub continue_from_last: bool,
    /// Reference instant for the last-completed period. Defaults to now.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<DateTime<Utc>>,
    /// Recorded hours covering the period.
    #[serde(default)]
    pub entries: Vec<PayrollEntry>,
    /// Display names keyed by employee id.
    #[serde(default)]
    pub names: HashMap<EmployeeId, String>,
}
