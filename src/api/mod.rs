//! HTTP API module for the Timecard Engine.
//!
//! This module provides the REST API endpoints used by the messaging
//! gateway (`POST /messages`) and the weekly scheduler (`POST /timecards`).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{MessageRequest, TimeCardRequest};
pub use response::{
    ApiError, ApiErrorResponse, MessageOutcome, MessageResponse, TimeCard, TimeCardResponse,
};
pub use state::AppState;
