//! Mock completion client for testing
//!
//! Answers every request with a scripted outcome and records what it was sent.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{Error, Result};

use super::traits::CompletionClient;
use super::types::ChatCompletionRequest;

/// Scripted outcome for the mock
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Success status with this raw body
    Body(String),
    /// Non-success status with this raw body
    Failure { status: u16, body: String },
    /// Transport failure with this message
    Unavailable(String),
}

/// Mock implementation of CompletionClient
pub struct MockClient {
    reply: MockReply,
    requests: RwLock<Vec<ChatCompletionRequest>>,
}

impl MockClient {
    /// Mock with a fixed reply outcome
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            requests: RwLock::new(Vec::new()),
        }
    }

    /// Mock that answers with a single choice whose content is `content`
    pub fn with_content(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        });
        Self::new(MockReply::Body(body.to_string()))
    }

    /// Mock that answers with an arbitrary raw success body
    pub fn with_body(body: impl Into<String>) -> Self {
        Self::new(MockReply::Body(body.into()))
    }

    /// Mock that fails with the given status and raw body
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::new(MockReply::Failure {
            status,
            body: body.into(),
        })
    }

    /// Number of requests received
    pub fn call_count(&self) -> usize {
        self.requests.read().len()
    }

    /// Most recent request, if any
    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.requests.read().last().cloned()
    }
}

#[async_trait]
impl CompletionClient for MockClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        self.requests.write().push(request.clone());

        match &self.reply {
            MockReply::Body(body) => Ok(body.clone()),
            MockReply::Failure { status, body } => Err(Error::UpstreamFailure {
                status: *status,
                body: body.clone(),
            }),
            MockReply::Unavailable(message) => Err(Error::UpstreamUnavailable {
                message: message.clone(),
            }),
        }
    }
}
