//! Prompt builders for the pipeline's provider calls
//!
//! The architect prompt carries the request, the registry catalogue, and
//! any accumulated human feedback. Section prompts combine the persona's
//! voice fragment with the writer's strategy fragment.

use hubloom_agents::{Persona, RenderContext, Writer};
use hubloom_core::{HubRequest, SectionBlueprint};
use hubloom_registry::Manifest;

/// Build the planning prompt for the Architect step
pub fn build_architect_prompt(
    request: &HubRequest,
    manifest: &Manifest,
    feedback: &[String],
) -> String {
    let mut prompt = String::new();

    prompt.push_str("# CONTENT ARCHITECT\n\n");
    prompt.push_str(
        "Plan the structure of a multi-section content hub. Select one \
         assembler and one persona from the catalogue, then lay out the \
         sections.\n\n",
    );

    prompt.push_str("## REQUEST\n\n");
    prompt.push_str(&format!("- Topic: {}\n", request.topic));
    if !request.goal.is_empty() {
        prompt.push_str(&format!("- Goal: {}\n", request.goal));
    }
    if !request.audience.is_empty() {
        prompt.push_str(&format!("- Audience: {}\n", request.audience));
    }
    prompt.push_str(&format!("- Language: {}\n\n", request.language));

    prompt.push_str("## AVAILABLE ASSEMBLERS\n\n");
    for entry in &manifest.assemblers {
        prompt.push_str(&format!("- {}: {}\n", entry.id, entry.description));
    }
    prompt.push('\n');

    prompt.push_str("## AVAILABLE PERSONAS\n\n");
    for entry in &manifest.personas {
        prompt.push_str(&format!("- {}: {}\n", entry.id, entry.description));
    }
    prompt.push('\n');

    if !feedback.is_empty() {
        prompt.push_str("## REVIEWER FEEDBACK\n\n");
        prompt.push_str("Earlier proposals were rejected. Address every point:\n\n");
        for item in feedback {
            prompt.push_str(&format!("- {}\n", item));
        }
        prompt.push('\n');
    }

    prompt.push_str("## OUTPUT\n\n");
    prompt.push_str(
        "Respond with JSON only:\n\
         {\"title\": \"...\", \"assemblerId\": \"...\", \"personaId\": \"...\", \
         \"sections\": [{\"heading\": \"...\", \"goal\": \"...\", \"writerId\": \"...\"}]}\n\
         Every writerId must be eligible under the chosen assembler.\n",
    );

    prompt
}

/// Build the drafting prompt for one section
pub fn build_section_prompt(
    request: &HubRequest,
    hub_title: &str,
    section: &SectionBlueprint,
    writer: &Writer,
    persona: &Persona,
) -> String {
    let ctx = RenderContext::new(&request.topic, &request.goal)
        .with_audience(&request.audience)
        .with_language(&request.language);

    let mut prompt = String::new();

    prompt.push_str("# SECTION WRITER\n\n");
    prompt.push_str(&format!(
        "Draft the section \"{}\" of the hub \"{}\".\n\n",
        section.heading, hub_title
    ));

    prompt.push_str("## VOICE\n\n");
    prompt.push_str(&persona.render_instructions(&ctx));
    prompt.push('\n');

    prompt.push_str("## STRATEGY\n\n");
    prompt.push_str(&writer.render_strategy(&section.goal));
    prompt.push('\n');

    prompt.push_str("## OUTPUT\n\n");
    prompt.push_str(
        "Respond with the section prose only. No heading, no frontmatter, \
         no commentary, and no placeholder markers.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubloom_agents::{builtin_personas, builtin_writers};
    use hubloom_registry::ManifestEntry;

    fn manifest() -> Manifest {
        Manifest {
            assemblers: vec![ManifestEntry {
                id: "pillar".to_string(),
                description: "Broad pillar page".to_string(),
            }],
            personas: vec![ManifestEntry {
                id: "mentor".to_string(),
                description: "Warm teaching voice".to_string(),
            }],
        }
    }

    #[test]
    fn test_architect_prompt_carries_catalogue() {
        let request = HubRequest::new("hub", "Sourdough").with_goal("Teach baking");
        let prompt = build_architect_prompt(&request, &manifest(), &[]);
        assert!(prompt.contains("- pillar: Broad pillar page"));
        assert!(prompt.contains("- mentor: Warm teaching voice"));
        assert!(prompt.contains("Topic: Sourdough"));
        assert!(!prompt.contains("REVIEWER FEEDBACK"));
    }

    #[test]
    fn test_architect_prompt_appends_feedback() {
        let request = HubRequest::new("hub", "Sourdough");
        let feedback = vec!["fewer sections".to_string(), "add a FAQ".to_string()];
        let prompt = build_architect_prompt(&request, &manifest(), &feedback);
        assert!(prompt.contains("REVIEWER FEEDBACK"));
        assert!(prompt.contains("- fewer sections"));
        assert!(prompt.contains("- add a FAQ"));
    }

    #[test]
    fn test_section_prompt_combines_fragments() {
        let request = HubRequest::new("hub", "Sourdough").with_language("German");
        let section = SectionBlueprint {
            heading: "Starters".to_string(),
            goal: "Explain starters".to_string(),
            writer_id: "narrative".to_string(),
        };
        let prompt = build_section_prompt(
            &request,
            "Sourdough at Home",
            &section,
            &builtin_writers()[0],
            &builtin_personas()[0],
        );
        assert!(prompt.contains("\"Starters\""));
        assert!(prompt.contains("Write in German."));
        assert!(prompt.contains("Explain starters"));
        assert!(prompt.contains("The Mentor"));
    }
}
