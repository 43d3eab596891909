//! `GET /ping` keep-alive handler.

use arcrelay_core::ForwardOutcome;
use arcrelay_runtime::PING_PROMPT;
use axum::extract::State;
use tracing::debug;

use crate::dto::{PING_FAILED, PING_WARMED};
use crate::state::AppState;

/// Send a short prompt to keep the hosted model warm.
///
/// Runs outside the chat preemption slot. Always answers 200; a failed
/// keep-alive only changes the text.
pub async fn ping(State(state): State<AppState>) -> &'static str {
    debug!("GET /ping");

    match state.forwarder.warm(PING_PROMPT).await {
        ForwardOutcome::Success(_) => PING_WARMED,
        ForwardOutcome::Cancelled | ForwardOutcome::Failed(_) => PING_FAILED,
    }
}
