//! HTTP request handlers for the Timecard Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    HELP_REPLY, MessageKind, PeriodSelection, build_ledgers, classify_message,
    confirmation_reply, local_date, parse_submission, rejection_reply, summarize_payroll,
};
use crate::error::EngineResult;

use super::request::{MessageRequest, TimeCardRequest};
use super::response::{
    ApiError, ApiErrorResponse, MessageOutcome, MessageResponse, TimeCard, TimeCardResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/messages", post(message_handler))
        .route("/timecards", post(timecard_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure onto a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /messages endpoint.
///
/// Classifies an inbound text message and, for time submissions, parses it
/// into a [`crate::models::TimeSubmission`] with the reply to send back.
/// Malformed submissions are answered with a `rejected` body rather than an
/// HTTP error, since the sender still gets a reply.
async fn message_handler(
    State(state): State<AppState>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing inbound message");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let response = match classify_message(&request.body, state.keywords()) {
        MessageKind::Ignored => MessageResponse {
            kind: MessageOutcome::Ignored,
            reply: None,
            submission: None,
            error_code: None,
        },
        MessageKind::Help => {
            info!(correlation_id = %correlation_id, from = %request.from, "Help requested");
            MessageResponse {
                kind: MessageOutcome::Help,
                reply: Some(HELP_REPLY.to_string()),
                submission: None,
                error_code: None,
            }
        }
        MessageKind::Submission => match parse_submission(&request.body) {
            Ok(submission) => {
                let received_at = request.received_at.unwrap_or_else(Utc::now);
                let date = local_date(received_at, state.config().timezone());
                info!(
                    correlation_id = %correlation_id,
                    from = %request.from,
                    date = %date,
                    hours = %submission.hours(),
                    "Time submission accepted"
                );
                MessageResponse {
                    kind: MessageOutcome::Submission,
                    reply: Some(confirmation_reply(&submission, date)),
                    submission: Some(submission),
                    error_code: None,
                }
            }
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    from = %request.from,
                    error = %err,
                    "Time submission rejected"
                );
                MessageResponse {
                    kind: MessageOutcome::Rejected,
                    reply: Some(rejection_reply(&err).to_string()),
                    submission: None,
                    error_code: Some(err.code().to_string()),
                }
            }
        },
    };

    json_response(StatusCode::OK, response)
}

/// Handler for POST /timecards endpoint.
///
/// Resolves the pay period, builds every employee's time card from the
/// supplied entries, and records the period end for the next continuation
/// run.
async fn timecard_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimeCardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing time card run");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match run_timecards(&state, request, correlation_id) {
        Ok(response) => {
            info!(
                correlation_id = %correlation_id,
                mode = %response.mode,
                start = %response.period.start_date(),
                end = %response.period.end_date(),
                cards = response.cards.len(),
                rejected = response.rejected.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Time card run completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Time card run failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Chooses the pay period for a run.
fn select_period(
    state: &AppState,
    request: &TimeCardRequest,
    correlation_id: Uuid,
) -> EngineResult<PeriodSelection> {
    if let Some(start) = request.start_date {
        return Ok(PeriodSelection::StartingOn(start));
    }

    if request.continue_from_last {
        let store = state.config().continuation_store();
        match store.last_end()? {
            Some(last_end) => return Ok(PeriodSelection::ContinueFrom(last_end)),
            None => warn!(
                correlation_id = %correlation_id,
                path = %store.path().display(),
                "No previous period recorded, using last completed period"
            ),
        }
    }

    Ok(PeriodSelection::LastCompleted {
        now: request.now.unwrap_or_else(Utc::now),
        timezone: state.config().timezone(),
        alignment: state.config().alignment(),
    })
}

fn run_timecards(
    state: &AppState,
    request: TimeCardRequest,
    correlation_id: Uuid,
) -> EngineResult<TimeCardResponse> {
    let selection = select_period(state, &request, correlation_id)?;
    let period = selection.resolve()?;

    let batch = build_ledgers(&period, &request.entries, &request.names);
    let summary = summarize_payroll(&batch, state.config().hourly_wage())?;

    state
        .config()
        .continuation_store()
        .record(period.end_date())?;

    Ok(TimeCardResponse {
        run_id: correlation_id,
        mode: selection.mode(),
        period,
        cards: batch.ledgers.iter().map(TimeCard::from).collect(),
        summary_text: summary.to_string(),
        summary,
        rejected: batch.rejected,
    })
}
