//! Response types for the Timecard Engine API.
//!
//! This module defines the success bodies of both endpoints together with
//! the error response structures and error handling for the HTTP API.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{PayrollSummary, RejectedEntry, SelectionMode};
use crate::error::EngineError;
use crate::models::{EmployeeId, Ledger, PayPeriod, TimeSubmission};

/// What happened to an inbound text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOutcome {
    /// A valid time submission; the caller should store it.
    Submission,
    /// The sender asked for help.
    Help,
    /// Not addressed to the bot; nothing to reply.
    Ignored,
    /// A malformed time submission.
    Rejected,
}

/// Response body for the `/messages` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// How the message was handled.
    pub kind: MessageOutcome,
    /// Text to send back to the sender, `null` when ignored.
    pub reply: Option<String>,
    /// The parsed submission to persist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<TimeSubmission>,
    /// Machine-readable rejection code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// One employee's rendered time card.
#[derive(Debug, Clone, Serialize)]
pub struct TimeCard {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Display name, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Date the period is paid.
    pub pay_date: NaiveDate,
    /// Hours for the period.
    pub total_hours: Decimal,
    /// Plain-text card to send to the employee.
    pub text: String,
}

impl From<&Ledger> for TimeCard {
    fn from(ledger: &Ledger) -> Self {
        Self {
            employee_id: ledger.employee_id(),
            name: ledger.name().map(str::to_string),
            pay_date: ledger.pay_date(),
            total_hours: ledger.total_hours(),
            text: ledger.to_string(),
        }
    }
}

/// Response body for the `/timecards` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TimeCardResponse {
    /// Identifier for this run.
    pub run_id: Uuid,
    /// How the period was chosen.
    pub mode: SelectionMode,
    /// The period covered.
    pub period: PayPeriod,
    /// One card per employee, ordered by employee id.
    pub cards: Vec<TimeCard>,
    /// Payroll totals for the administrator.
    pub summary: PayrollSummary,
    /// Plain-text rendering of `summary`.
    pub summary_text: String,
    /// Entries that could not be placed on a card.
    pub rejected: Vec<RejectedEntry>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            err @ (EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. }) => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        err.to_string(),
                    ),
                }
            }
            err @ (EngineError::StateIo { .. } | EngineError::StateParse { .. }) => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "STATE_ERROR",
                        "Continuation state unavailable",
                        err.to_string(),
                    ),
                }
            }
            EngineError::TimeEntry(err) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(err.code(), err.to_string()),
            },
            EngineError::Period(err) => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(err.code(), err.to_string()),
            },
        }
    }
}
