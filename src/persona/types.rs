//! Core types for the persona system.
//!
//! A persona pairs a display name with the system prompt that shapes how the
//! completion model answers. Prompts are opaque to the relay.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Assistant Id
// ─────────────────────────────────────────────────────────────────

/// The four assistants a chat request can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantId {
    /// Pastoral encouragement and emotional support.
    FaithCompanion,
    /// Bible and faith questions in everyday language.
    FaithBuilder,
    /// Practical next steps for real-life situations.
    FaithInPractice,
    /// Calm, Christ-centered reflection moments.
    FaithMindfulness,
}

impl AssistantId {
    /// Identifier used on the wire (`assistantId`).
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantId::FaithCompanion => "faith_companion",
            AssistantId::FaithBuilder => "faith_builder",
            AssistantId::FaithInPractice => "faith_in_practice",
            AssistantId::FaithMindfulness => "faith_mindfulness",
        }
    }

    /// All assistants in listing order.
    pub fn all() -> &'static [AssistantId] {
        &[
            AssistantId::FaithCompanion,
            AssistantId::FaithBuilder,
            AssistantId::FaithInPractice,
            AssistantId::FaithMindfulness,
        ]
    }
}

impl fmt::Display for AssistantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantId {
    type Err = String;

    /// Exact, case-sensitive match on the wire identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssistantId::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown assistant '{}'. Valid: faith_companion, faith_builder, faith_in_practice, faith_mindfulness",
                    s
                )
            })
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona (loaded from bundled TOML)
// ─────────────────────────────────────────────────────────────────

/// A persona definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Which assistant this persona answers as.
    pub id: AssistantId,

    /// Name returned to clients as `assistantName`.
    pub display_name: String,

    /// One-line summary for listings.
    pub description: String,

    /// Instruction text sent as the system message.
    pub system_prompt: String,
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
