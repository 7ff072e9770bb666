//! OpenAI chat completions client
//!
//! Implements CompletionClient by posting to `{base_url}/chat/completions`
//! with a bearer credential.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::OpenAiSettings;
use crate::error::{Error, Result};

use super::traits::CompletionClient;
use super::types::ChatCompletionRequest;

// ─────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL (e.g., "https://api.openai.com/v1")
    pub base_url: String,

    /// API key (sent as a bearer token when non-empty)
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

impl From<&OpenAiSettings> for OpenAiConfig {
    fn from(settings: &OpenAiSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            timeout_secs: settings.timeout_secs,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// OpenAI Client
// ─────────────────────────────────────────────────────────────────

/// HTTP client for the OpenAI chat completions endpoint
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiClient {
    /// Create a new client with the given configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(crate::version::build_info().user_agent())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Full URL of the completions endpoint
    pub fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Build the authorization header value (if an API key is set)
    fn auth_header(&self) -> Option<String> {
        if self.config.api_key.is_empty() {
            None
        } else {
            Some(format!("Bearer {}", self.config.api_key))
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        let start = Instant::now();
        let url = self.completions_url();

        let mut req = self.client.post(&url).json(request);
        if let Some(ref auth) = self.auth_header() {
            req = req.header("Authorization", auth);
        }

        let response = req.send().await.map_err(|e| {
            warn!(error = %e, timeout = e.is_timeout(), "Completion request failed");
            Error::UpstreamUnavailable {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| Error::UpstreamUnavailable {
            message: format!("Failed to read response body: {}", e),
        })?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Completion response received"
        );

        if status == StatusCode::OK {
            Ok(body)
        } else {
            Err(Error::UpstreamFailure {
                status: status.as_u16(),
                body,
            })
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
