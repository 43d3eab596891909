//! HTTP handlers, one module per route.

pub mod chat;
pub mod ping;
pub mod status;
