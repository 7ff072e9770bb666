//! Chat relay
//!
//! Access check, persona lookup and the single completion call behind
//! `POST /chat`.

mod handler;
mod types;

pub use handler::{
    completion_request, ChatRelay, RelayConfig, FALLBACK_REPLY, FREQUENCY_PENALTY, MAX_TOKENS,
    MODEL, PRESENCE_PENALTY, TEMPERATURE,
};
pub use types::{ChatReply, ChatRequest, HealthStatus};
