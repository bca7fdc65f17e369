//! Assembler structural strategies

use hubloom_core::{parse_writer_ids, ParsedArtifact};
use serde::{Deserialize, Serialize};

/// A named structural strategy constraining which writers may be used and
/// how sections are organized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembler {
    pub id: String,
    pub description: String,
    pub strategy_prompt: String,
    /// Writers eligible under this strategy
    pub writer_ids: Vec<String>,
}

impl Assembler {
    /// Build an assembler from a parsed artifact; the body is the strategy
    /// prompt, `writerIds` comes from the header.
    pub fn from_parsed(id: impl Into<String>, parsed: &ParsedArtifact) -> Self {
        Self {
            id: id.into(),
            description: parsed.field_or("description", "").to_string(),
            strategy_prompt: parsed.body.clone(),
            writer_ids: parse_writer_ids(parsed.field_or("writerIds", "")),
        }
    }

    /// Whether a writer may draft under this strategy
    pub fn is_eligible(&self, writer_id: &str) -> bool {
        self.writer_ids.iter().any(|id| id == writer_id)
    }

    /// Render the structural-strategy fragment for the architect prompt
    pub fn render_strategy(&self) -> String {
        let mut fragment = String::new();
        fragment.push_str(&format!("Structural strategy ({}):\n", self.id));
        fragment.push_str(&self.strategy_prompt);
        fragment.push('\n');
        fragment.push_str(&format!(
            "Eligible writers: {}\n",
            self.writer_ids.join(", ")
        ));
        fragment
    }
}

/// Built-in assembler roster
pub fn builtin_assemblers() -> Vec<Assembler> {
    vec![
        Assembler {
            id: "pillar".to_string(),
            description: "Broad pillar page: overview first, then one section per subtopic".to_string(),
            strategy_prompt: "Open with a broad overview section, then cover each major \
                subtopic in its own section, ordered from fundamentals to advanced. \
                Aim for five to eight sections."
                .to_string(),
            writer_ids: vec![
                "narrative".to_string(),
                "howto".to_string(),
                "listicle".to_string(),
                "comparison".to_string(),
            ],
        },
        Assembler {
            id: "faq".to_string(),
            description: "Question-led hub: each section answers one reader question".to_string(),
            strategy_prompt: "Every section heading is a question the target audience \
                actually asks. Order questions from most to least common."
                .to_string(),
            writer_ids: vec!["howto".to_string(), "listicle".to_string()],
        },
        Assembler {
            id: "deep-dive".to_string(),
            description: "Long-form argument: few sections, each developed at length".to_string(),
            strategy_prompt: "Use three or four substantial sections that build a single \
                argument in sequence. Each section assumes the previous one was read."
                .to_string(),
            writer_ids: vec!["narrative".to_string(), "comparison".to_string()],
        },
    ]
}
