//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};

use crate::error::Error;
use crate::relay::{ChatReply, ChatRequest, HealthStatus};

use super::AppState;

/// Liveness check
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.relay.health())
}

/// Relay one chat message.
///
/// The body is read raw so that a malformed payload reaches the access
/// check as an empty request instead of being rejected by the extractor.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatReply>, Error> {
    let request = ChatRequest::from_slice(&body);
    let reply = state.relay.chat(&request).await?;
    Ok(Json(reply))
}
