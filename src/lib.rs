//! Faith Hub - persona chat relay
//!
//! A single-endpoint HTTP relay for the Halifax Elim Faith Hub. Each chat
//! request carries a shared access code, an assistant id and a message; the
//! message is paired with that assistant's system prompt and sent to the
//! OpenAI chat completions API in one call.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod persona;
pub mod relay;
pub mod server;
pub mod upstream;
pub mod version;

pub use config::HubConfig;
pub use error::{Error, Result};
pub use persona::{AssistantId, Persona, PersonaRegistry};
pub use relay::{ChatRelay, ChatReply, ChatRequest, RelayConfig};
pub use server::{create_router, serve, AppState};
pub use upstream::{CompletionClient, MockClient, OpenAiClient, OpenAiConfig};
