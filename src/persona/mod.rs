//! Persona system: the fixed set of assistants a chat request can address.
//!
//! Each persona carries the display name returned to clients and the system
//! prompt prepended to the user's message before it is relayed.

pub mod registry;
pub mod types;

pub use registry::PersonaRegistry;
pub use types::{AssistantId, Persona};
