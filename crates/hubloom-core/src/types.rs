//! Core type definitions for hubloom orchestration

use crate::artifact::ContentFrontmatter;
use crate::{HubloomError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A request to generate one content hub
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubRequest {
    /// Hub identifier (becomes the artifact id)
    pub hub_id: String,
    /// The topic the hub covers
    pub topic: String,
    /// What the hub should achieve
    pub goal: String,
    /// Who the hub is written for
    pub audience: String,
    /// Target language for all drafting
    pub language: String,
}

impl HubRequest {
    pub fn new(hub_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            hub_id: hub_id.into(),
            topic: topic.into(),
            goal: String::new(),
            audience: String::new(),
            language: "English".to_string(),
        }
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
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

/// One planned section within a hub blueprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBlueprint {
    /// Section heading as it will appear in the document
    pub heading: String,
    /// What the section should accomplish
    pub goal: String,
    /// The writer strategy assigned to draft this section
    pub writer_id: String,
}

/// The planned structure of one content hub, produced by the Architect step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubBlueprint {
    /// Hub title
    pub title: String,
    /// Structural strategy the Architect selected
    pub assembler_id: String,
    /// Voice profile the Architect selected
    pub persona_id: String,
    /// Sections in drafting and assembly order
    pub sections: Vec<SectionBlueprint>,
}

impl HubBlueprint {
    /// Decode a blueprint from the Architect's JSON output
    ///
    /// The Architect may wrap its JSON in a fenced code block; the fence is
    /// stripped before decoding. A malformed payload is a structural defect,
    /// not a serialization failure, so it can be routed back through the
    /// architect ask.
    pub fn from_architect_output(output: &str) -> Result<Self> {
        let json = strip_code_fence(output);
        let blueprint: HubBlueprint = serde_json::from_str(json).map_err(|e| {
            HubloomError::StructuralDefect(format!("Blueprint is not valid JSON: {}", e))
        })?;

        if blueprint.sections.is_empty() {
            return Err(HubloomError::StructuralDefect(
                "Blueprint contains no sections".to_string(),
            ));
        }

        Ok(blueprint)
    }

    /// Writer ids referenced by this blueprint, in section order
    pub fn writer_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.writer_id.clone()).collect()
    }
}

/// Extract the JSON payload from output that may be fenced with ```
fn strip_code_fence(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Outcome of drafting one section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDraft {
    /// Heading from the blueprint
    pub heading: String,
    /// Writer strategy that produced the draft
    pub writer_id: String,
    /// Drafted prose
    pub body: String,
}

/// A section that failed to draft and was explicitly abandoned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionFailure {
    /// Heading from the blueprint
    pub heading: String,
    /// Why drafting was abandoned
    pub reason: String,
}

/// An assembled hub: frontmatter plus drafted sections in blueprint order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubArtifact {
    /// Persisted metadata header
    pub frontmatter: ContentFrontmatter,
    /// Hub title
    pub title: String,
    /// Sections that completed drafting, in blueprint order
    pub sections: Vec<SectionDraft>,
    /// When the hub was assembled
    pub assembled_at: DateTime<Utc>,
}

impl HubArtifact {
    /// Render the full artifact as markdown with a leading header block
    pub fn to_markdown(&self) -> String {
        let mut doc = self.frontmatter.to_header_block();
        doc.push('\n');
        doc.push_str(&format!("# {}\n", self.title));
        for section in &self.sections {
            doc.push('\n');
            doc.push_str(&format!("## {}\n\n", section.heading));
            doc.push_str(section.body.trim());
            doc.push('\n');
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUEPRINT_JSON: &str = r#"{
        "title": "Sourdough at Home",
        "assemblerId": "pillar",
        "personaId": "mentor",
        "sections": [
            {"heading": "Starters", "goal": "Explain starters", "writerId": "narrative"},
            {"heading": "Baking", "goal": "Walk through a bake", "writerId": "howto"}
        ]
    }"#;

    #[test]
    fn test_blueprint_from_json() {
        let blueprint = HubBlueprint::from_architect_output(BLUEPRINT_JSON).unwrap();
        assert_eq!(blueprint.title, "Sourdough at Home");
        assert_eq!(blueprint.assembler_id, "pillar");
        assert_eq!(blueprint.sections.len(), 2);
        assert_eq!(blueprint.sections[1].writer_id, "howto");
        assert_eq!(blueprint.writer_ids(), vec!["narrative", "howto"]);
    }

    #[test]
    fn test_blueprint_from_fenced_output() {
        let fenced = format!("```json\n{}\n```", BLUEPRINT_JSON);
        let blueprint = HubBlueprint::from_architect_output(&fenced).unwrap();
        assert_eq!(blueprint.sections.len(), 2);
    }

    #[test]
    fn test_malformed_blueprint_is_structural_defect() {
        let result = HubBlueprint::from_architect_output("not json at all");
        assert!(matches!(
            result,
            Err(HubloomError::StructuralDefect(_))
        ));
    }

    #[test]
    fn test_empty_sections_rejected() {
        let json = r#"{"title": "T", "assemblerId": "a", "personaId": "p", "sections": []}"#;
        let result = HubBlueprint::from_architect_output(json);
        assert!(matches!(result, Err(HubloomError::StructuralDefect(_))));
    }

    #[test]
    fn test_hub_request_builder() {
        let request = HubRequest::new("sourdough", "Sourdough baking")
            .with_goal("Teach home bakers")
            .with_audience("beginners")
            .with_language("German");
        assert_eq!(request.hub_id, "sourdough");
        assert_eq!(request.language, "German");
    }

    #[test]
    fn test_hub_request_defaults_language() {
        let request = HubRequest::new("id", "topic");
        assert_eq!(request.language, "English");
    }
}
