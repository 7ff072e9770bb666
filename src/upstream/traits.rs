//! Completion client trait
//!
//! Defines the seam between the relay and whatever answers chat completions.

use async_trait::async_trait;

use crate::error::Result;

use super::types::ChatCompletionRequest;

/// A service that turns a chat completion request into a reply body.
///
/// Implementations perform exactly one call per invocation and never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Client name for logs (e.g., "openai", "mock")
    fn name(&self) -> &'static str;

    /// Send one completion request.
    ///
    /// Returns the raw response body when the status is 200. Any other
    /// status yields [`Error::UpstreamFailure`](crate::error::Error::UpstreamFailure)
    /// carrying the body unmodified; transport problems yield
    /// [`Error::UpstreamUnavailable`](crate::error::Error::UpstreamUnavailable).
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String>;
}
