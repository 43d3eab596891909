//! Axum-specific error types and mappings.
//!
//! Every failure a handler can hit ends up here and is rendered as a JSON
//! body; nothing propagates past the gateway.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::dto::{ABORTED_BY_NEWER, ErrorBody, INVALID_PROMPT, SERVER_ERROR};

/// Non-standard "client closed request" status used for preempted chats.
pub const CLIENT_CLOSED_REQUEST: u16 = 499;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request body did not carry a usable prompt.
    #[error("{}", INVALID_PROMPT)]
    InvalidPrompt,

    /// A newer chat request cancelled this one.
    #[error("{}", ABORTED_BY_NEWER)]
    Aborted,

    /// The upstream call failed; carries the diagnostic text.
    #[error("{}: {}", SERVER_ERROR, .0)]
    Upstream(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPrompt => StatusCode::BAD_REQUEST,
            Self::Aborted => StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::InvalidPrompt => ErrorBody::new(INVALID_PROMPT),
            Self::Aborted => ErrorBody::new(ABORTED_BY_NEWER),
            Self::Upstream(details) => ErrorBody::new(SERVER_ERROR).with_details(details),
        };

        (status, Json(body)).into_response()
    }
}
