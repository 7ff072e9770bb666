//! Upstream completion service
//!
//! This module provides the client abstraction for the chat completion API
//! and its implementations.

mod mock;
mod openai;
mod traits;
mod types;

pub use mock::{MockClient, MockReply};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use traits::CompletionClient;
pub use types::{ChatChoice, ChatChoiceMessage, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Role};
