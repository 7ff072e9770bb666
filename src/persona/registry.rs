//! Bundled persona registry.
//!
//! Persona definitions ship inside the binary as TOML documents and are parsed
//! once at startup. The registry is read-only afterwards.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Error, Result};

use super::types::{AssistantId, Persona};

/// Get the bundled TOML definition for an assistant.
fn bundled_definition(id: AssistantId) -> &'static str {
    match id {
        AssistantId::FaithCompanion => include_str!("../../config/personas/faith-companion.toml"),
        AssistantId::FaithBuilder => include_str!("../../config/personas/faith-builder.toml"),
        AssistantId::FaithInPractice => {
            include_str!("../../config/personas/faith-in-practice.toml")
        }
        AssistantId::FaithMindfulness => {
            include_str!("../../config/personas/faith-mindfulness.toml")
        }
    }
}

/// Read-only lookup table of personas.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: HashMap<AssistantId, Persona>,
}

impl PersonaRegistry {
    /// Build the registry from the bundled definitions.
    pub fn with_builtins() -> Result<Self> {
        let mut personas = HashMap::with_capacity(AssistantId::all().len());
        for id in AssistantId::all() {
            let persona = parse_definition(*id, bundled_definition(*id))?;
            debug!(assistant = %id, name = %persona.display_name, "Persona registered");
            personas.insert(*id, persona);
        }
        Ok(Self { personas })
    }

    /// Find a persona by its wire identifier. Exact match only.
    pub fn lookup(&self, id: &str) -> Option<&Persona> {
        let id: AssistantId = id.parse().ok()?;
        self.personas.get(&id)
    }

    /// Get the persona for a known assistant.
    pub fn get(&self, id: AssistantId) -> Option<&Persona> {
        self.personas.get(&id)
    }

    /// All personas in listing order.
    pub fn list(&self) -> Vec<&Persona> {
        AssistantId::all()
            .iter()
            .filter_map(|id| self.personas.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

/// Parse and validate one persona definition.
fn parse_definition(expected: AssistantId, source: &str) -> Result<Persona> {
    let persona: Persona = toml::from_str(source).map_err(|e| {
        Error::persona_invalid(expected.as_str(), format!("Failed to parse TOML: {}", e))
    })?;

    if persona.id != expected {
        return Err(Error::persona_invalid(
            expected.as_str(),
            format!(
                "Definition id '{}' does not match expected '{}'",
                persona.id, expected
            ),
        ));
    }
    if persona.display_name.trim().is_empty() {
        return Err(Error::persona_invalid(
            expected.as_str(),
            "display_name must not be empty",
        ));
    }
    if persona.system_prompt.trim().is_empty() {
        return Err(Error::persona_invalid(
            expected.as_str(),
            "system_prompt must not be empty",
        ));
    }

    Ok(persona)
}
