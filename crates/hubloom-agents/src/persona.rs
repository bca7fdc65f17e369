//! Persona voice profiles
//!
//! A persona is a pure value object: given a render context it produces a
//! deterministic instruction fragment by template substitution. No network
//! or disk access happens here.

use hubloom_core::ParsedArtifact;
use serde::{Deserialize, Serialize};

/// Context supplied to instruction rendering
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// The topic being written about
    pub topic: String,
    /// What the content should achieve
    pub goal: String,
    /// Who the content is written for
    pub audience: String,
    /// Target language; when empty the persona's own language applies
    pub language: String,
}

impl RenderContext {
    pub fn new(topic: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            goal: goal.into(),
            audience: String::new(),
            language: String::new(),
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// A named voice/tone/language profile applied to all drafting in a hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub description: String,
    pub language: String,
    pub accent: String,
    pub tone: String,
    pub role_description: String,
}

impl Persona {
    /// Build a persona from a parsed artifact; the body is the role
    /// description, missing optional fields take explicit defaults.
    pub fn from_parsed(id: impl Into<String>, parsed: &ParsedArtifact) -> Self {
        let id = id.into();
        Self {
            name: parsed.field_or("name", &id).to_string(),
            description: parsed.field_or("description", "").to_string(),
            language: parsed.field_or("language", "English").to_string(),
            accent: parsed.field_or("accent", "").to_string(),
            tone: parsed.field_or("tone", "Neutral").to_string(),
            role_description: parsed.body.clone(),
            id,
        }
    }

    /// Render the voice instruction fragment for a drafting prompt
    ///
    /// The context language overrides the persona's declared language when
    /// set; rendering never fails for well-formed input.
    pub fn render_instructions(&self, ctx: &RenderContext) -> String {
        let language = if ctx.language.is_empty() {
            &self.language
        } else {
            &ctx.language
        };

        let mut fragment = String::new();
        fragment.push_str(&format!("You write as {}.", self.name));
        if !self.role_description.is_empty() {
            fragment.push_str(&format!(" {}", self.role_description));
        }
        fragment.push('\n');
        fragment.push_str(&format!("Tone: {}.", self.tone));
        if !self.accent.is_empty() {
            fragment.push_str(&format!(" Accent: {}.", self.accent));
        }
        fragment.push('\n');
        fragment.push_str(&format!("Write in {}.\n", language));
        if !ctx.audience.is_empty() {
            fragment.push_str(&format!("Your reader: {}.\n", ctx.audience));
        }
        fragment
    }
}

/// Built-in persona roster
pub fn builtin_personas() -> Vec<Persona> {
    vec![
        Persona {
            id: "mentor".to_string(),
            name: "The Mentor".to_string(),
            description: "Warm, patient teaching voice for beginners".to_string(),
            language: "English".to_string(),
            accent: String::new(),
            tone: "Warm".to_string(),
            role_description: "You explain ideas step by step, anticipate confusion, \
                and encourage the reader to try things themselves."
                .to_string(),
        },
        Persona {
            id: "analyst".to_string(),
            name: "The Analyst".to_string(),
            description: "Precise, evidence-led voice for technical readers".to_string(),
            language: "English".to_string(),
            accent: String::new(),
            tone: "Measured".to_string(),
            role_description: "You lead with data, qualify claims carefully, \
                and prefer concrete numbers over adjectives."
                .to_string(),
        },
        Persona {
            id: "storyteller".to_string(),
            name: "The Storyteller".to_string(),
            description: "Narrative voice that opens with scenes, not summaries".to_string(),
            language: "English".to_string(),
            accent: String::new(),
            tone: "Vivid".to_string(),
            role_description: "You anchor every section in a concrete scene or person \
                before drawing out the general point."
                .to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubloom_core::parse_artifact;

    #[test]
    fn test_render_uses_context_language() {
        let persona = &builtin_personas()[0];
        let ctx = RenderContext::new("baking", "teach").with_language("German");
        let fragment = persona.render_instructions(&ctx);
        assert!(fragment.contains("Write in German."));
    }

    #[test]
    fn test_render_falls_back_to_persona_language() {
        let persona = &builtin_personas()[0];
        let ctx = RenderContext::new("baking", "teach");
        let fragment = persona.render_instructions(&ctx);
        assert!(fragment.contains("Write in English."));
    }

    #[test]
    fn test_render_is_deterministic() {
        let persona = &builtin_personas()[1];
        let ctx = RenderContext::new("topic", "goal").with_audience("engineers");
        assert_eq!(
            persona.render_instructions(&ctx),
            persona.render_instructions(&ctx)
        );
    }

    #[test]
    fn test_from_parsed_with_defaults() {
        let parsed = parse_artifact("name: Coach\n\nYou push the reader hard.");
        let persona = Persona::from_parsed("coach", &parsed);
        assert_eq!(persona.id, "coach");
        assert_eq!(persona.name, "Coach");
        assert_eq!(persona.language, "English");
        assert_eq!(persona.tone, "Neutral");
        assert_eq!(persona.role_description, "You push the reader hard.");
    }

    #[test]
    fn test_from_parsed_name_defaults_to_id() {
        let parsed = parse_artifact("tone: Dry\n\nbody");
        let persona = Persona::from_parsed("skeptic", &parsed);
        assert_eq!(persona.name, "skeptic");
        assert_eq!(persona.tone, "Dry");
    }
}
