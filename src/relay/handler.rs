//! Chat relay
//!
//! Validates an inbound chat request, pairs the message with the persona's
//! system prompt and makes a single completion call.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::config::HubConfig;
use crate::error::{Error, Result};
use crate::persona::{Persona, PersonaRegistry};
use crate::upstream::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CompletionClient};

use super::types::{ChatReply, ChatRequest, HealthStatus};

// ─────────────────────────────────────────────────────────────────
// Generation Parameters
// ─────────────────────────────────────────────────────────────────

/// Completion model
pub const MODEL: &str = "gpt-4o";

pub const TEMPERATURE: f64 = 0.85;

pub const PRESENCE_PENALTY: f64 = 0.3;

pub const FREQUENCY_PENALTY: f64 = 0.2;

pub const MAX_TOKENS: u32 = 800;

/// Reply used when a successful completion carries no text
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't generate a response just now.";

// ─────────────────────────────────────────────────────────────────
// Relay Configuration
// ─────────────────────────────────────────────────────────────────

/// Static settings the relay is built with
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Shared access code every request must carry
    pub access_code: String,

    /// Who hands out the access code (named in the denial message)
    pub operator: String,

    /// Service name reported by the health check
    pub service_name: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            access_code: "Halifax-elim".to_string(),
            operator: "Halifax Elim".to_string(),
            service_name: "Halifax Elim Faith Hub".to_string(),
        }
    }
}

impl From<&HubConfig> for RelayConfig {
    fn from(config: &HubConfig) -> Self {
        Self {
            access_code: config.access.code.clone(),
            operator: config.access.operator.clone(),
            service_name: config.server.service_name.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Chat Relay
// ─────────────────────────────────────────────────────────────────

/// Stateless request handler shared by every connection
pub struct ChatRelay {
    registry: PersonaRegistry,
    client: Arc<dyn CompletionClient>,
    access_digest: Vec<u8>,
    operator: String,
    service_name: String,
}

impl ChatRelay {
    pub fn new(
        config: RelayConfig,
        registry: PersonaRegistry,
        client: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            registry,
            client,
            access_digest: Sha256::digest(config.access_code.as_bytes()).to_vec(),
            operator: config.operator,
            service_name: config.service_name,
        }
    }

    pub fn registry(&self) -> &PersonaRegistry {
        &self.registry
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            service: self.service_name.clone(),
        }
    }

    /// Handle one chat request.
    ///
    /// Checks run in a fixed order (access code, assistant, message) and
    /// the completion API is only called once all of them pass.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        if !self.access_code_matches(request.access_code()) {
            warn!(outcome = "access_denied", "Chat request rejected");
            return Err(Error::access_denied(&self.operator));
        }

        let assistant_id = request.assistant_id();
        let persona = self.registry.lookup(assistant_id).ok_or_else(|| {
            warn!(outcome = "invalid_assistant", "Chat request rejected");
            Error::InvalidAssistant {
                id: assistant_id.to_string(),
            }
        })?;

        let message = request.message();
        if message.is_empty() {
            warn!(assistant = %persona.id, outcome = "empty_message", "Chat request rejected");
            return Err(Error::EmptyMessage);
        }

        let completion = completion_request(persona, message);
        let body = match self.client.complete(&completion).await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    assistant = %persona.id,
                    client = self.client.name(),
                    outcome = "upstream_error",
                    error = %e.code(),
                    "Completion call failed"
                );
                return Err(e);
            }
        };

        let reply = match ChatCompletionResponse::parse(&body).and_then(|r| r.first_content()) {
            Some(text) => text,
            None => {
                warn!(assistant = %persona.id, outcome = "fallback", "Completion carried no reply text");
                FALLBACK_REPLY.to_string()
            }
        };

        info!(
            assistant = %persona.id,
            reply_chars = reply.chars().count(),
            outcome = "ok",
            "Chat request relayed"
        );

        Ok(ChatReply {
            assistant_name: persona.display_name.clone(),
            reply,
        })
    }

    /// Exact, case-sensitive comparison performed over SHA-256 digests so
    /// the time taken does not depend on where the inputs differ.
    fn access_code_matches(&self, provided: &str) -> bool {
        let provided = Sha256::digest(provided.as_bytes());
        self.access_digest
            .iter()
            .zip(provided.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// The two-message completion request for a persona and user message
pub fn completion_request(persona: &Persona, message: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: MODEL.to_string(),
        messages: vec![
            ChatMessage::system(persona.system_prompt.as_str()),
            ChatMessage::user(message),
        ],
        temperature: TEMPERATURE,
        presence_penalty: PRESENCE_PENALTY,
        frequency_penalty: FREQUENCY_PENALTY,
        max_tokens: MAX_TOKENS,
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
