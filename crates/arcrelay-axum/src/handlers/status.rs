//! `GET /` handler.

use crate::dto::STATUS_MESSAGE;

/// Fixed status text; no side effects.
pub async fn index() -> &'static str {
    STATUS_MESSAGE
}
