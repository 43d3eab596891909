//! `POST /chat` handler.

use arcrelay_core::{ChatPrompt, ForwardOutcome};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

use crate::error::HttpError;
use crate::state::AppState;

/// Validate the prompt and forward it, preempting any earlier chat.
///
/// The upstream payload is returned verbatim on success.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, HttpError> {
    debug!("POST /chat");

    let prompt = parse_prompt(body)?;

    match state.forwarder.submit(prompt).await {
        ForwardOutcome::Success(payload) => Ok(Json(payload).into_response()),
        ForwardOutcome::Cancelled => Err(HttpError::Aborted),
        ForwardOutcome::Failed(details) => Err(HttpError::Upstream(details)),
    }
}

/// Accept only a JSON object whose `prompt` is non-blank text.
fn parse_prompt(body: Result<Json<Value>, JsonRejection>) -> Result<ChatPrompt, HttpError> {
    let Json(body) = body.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected chat body");
        HttpError::InvalidPrompt
    })?;

    ChatPrompt::from_json(body.get("prompt")).map_err(|e| {
        debug!(reason = %e, "Rejected chat prompt");
        HttpError::InvalidPrompt
    })
}
