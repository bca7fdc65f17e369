//! Writer drafting strategies

use hubloom_core::ParsedArtifact;
use serde::{Deserialize, Serialize};

/// A named drafting strategy applied to one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Writer {
    pub id: String,
    pub description: String,
    pub writing_strategy: String,
}

impl Writer {
    /// Build a writer from a parsed artifact; the body is the strategy text
    pub fn from_parsed(id: impl Into<String>, parsed: &ParsedArtifact) -> Self {
        Self {
            id: id.into(),
            description: parsed.field_or("description", "").to_string(),
            writing_strategy: parsed.body.clone(),
        }
    }

    /// Render the writing-strategy fragment for a section prompt
    pub fn render_strategy(&self, section_goal: &str) -> String {
        let mut fragment = String::new();
        fragment.push_str(&format!("Drafting strategy ({}):\n", self.id));
        fragment.push_str(&self.writing_strategy);
        fragment.push('\n');
        if !section_goal.is_empty() {
            fragment.push_str(&format!("This section must accomplish: {}\n", section_goal));
        }
        fragment
    }
}

/// Built-in writer roster
pub fn builtin_writers() -> Vec<Writer> {
    vec![
        Writer {
            id: "narrative".to_string(),
            description: "Flowing prose that builds an argument paragraph by paragraph".to_string(),
            writing_strategy: "Write continuous prose. Open with the section's core claim, \
                develop it through examples, and close by connecting back to the hub's goal. \
                No bullet lists."
                .to_string(),
        },
        Writer {
            id: "howto".to_string(),
            description: "Numbered step-by-step instructions".to_string(),
            writing_strategy: "Write numbered steps the reader can follow directly. \
                Each step starts with an imperative verb and names the expected outcome."
                .to_string(),
        },
        Writer {
            id: "listicle".to_string(),
            description: "Scannable bulleted points with bolded leads".to_string(),
            writing_strategy: "Write a short framing sentence, then bullet points. \
                Each bullet leads with a bolded phrase and expands it in one or two sentences."
                .to_string(),
        },
        Writer {
            id: "comparison".to_string(),
            description: "Side-by-side evaluation of alternatives".to_string(),
            writing_strategy: "Name the alternatives up front, compare them on the same \
                criteria in the same order, and end with a clear recommendation."
                .to_string(),
        },
    ]
}
