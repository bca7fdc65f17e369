//! Persisted artifact format: structured header block plus free-text body
//!
//! Every stored hub or agent definition is one file with a leading
//! YAML-like `key: value` header (optionally fenced with `---`), a blank
//! line, and free-text body content. Parsing never fails for readable
//! text; required fields are enforced by the layer that consumes them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An artifact split into its header fields and trimmed body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArtifact {
    /// Header fields in file order (keys are case-sensitive)
    pub header: HashMap<String, String>,
    /// Body content with surrounding whitespace trimmed
    pub body: String,
}

impl ParsedArtifact {
    /// Get a header field, trimmed
    pub fn field(&self, key: &str) -> Option<&str> {
        self.header.get(key).map(|v| v.as_str())
    }

    /// Get a header field or a default when absent or blank
    pub fn field_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.field(key) {
            Some(value) if !value.is_empty() => value,
            _ => default,
        }
    }
}

/// Parse an artifact's header block and body
///
/// Two layouts are accepted: a `---` fenced header, or bare `key: value`
/// lines terminated by the first blank line. Lines inside the header that
/// carry no `:` are ignored rather than treated as errors.
pub fn parse_artifact(raw: &str) -> ParsedArtifact {
    let mut lines = raw.lines().peekable();
    let mut header = HashMap::new();

    let fenced = matches!(lines.peek(), Some(line) if line.trim() == "---");
    if fenced {
        lines.next();
    }

    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_header = true;

    for line in lines {
        if in_header {
            let trimmed = line.trim();
            let at_end = if fenced {
                trimmed == "---"
            } else {
                trimmed.is_empty()
            };
            if at_end {
                in_header = false;
                continue;
            }
            if let Some((key, value)) = trimmed.split_once(':') {
                header.insert(key.trim().to_string(), value.trim().to_string());
            }
        } else {
            body_lines.push(line);
        }
    }

    ParsedArtifact {
        header,
        body: body_lines.join("\n").trim().to_string(),
    }
}

/// Parse a free-text writer id list into an ordered, deduplicated list
///
/// Accepts comma-separated text or a bracketed inline list. Entries are
/// trimmed, blanks removed, and duplicates dropped keeping the first
/// occurrence: `"a, b ,b,"` yields `["a", "b"]`.
pub fn parse_writer_ids(raw: &str) -> Vec<String> {
    let inner = raw
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    let mut ids: Vec<String> = Vec::new();
    for entry in inner.split(',') {
        let entry = entry.trim();
        if entry.is_empty() || ids.iter().any(|id| id == entry) {
            continue;
        }
        ids.push(entry.to_string());
    }
    ids
}

/// Persisted metadata of a hub artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFrontmatter {
    /// Artifact identifier
    pub id: String,
    /// Voice profile the hub was drafted with
    pub persona_id: String,
    /// Language the hub was drafted in
    pub language: String,
    /// Writer strategies actually used, in section order
    pub writer_ids: Vec<String>,
    /// Model that produced the drafts
    pub model: String,
    /// Short description of the hub
    pub description: String,
}

impl ContentFrontmatter {
    /// Build frontmatter from a parsed artifact header
    pub fn from_parsed(parsed: &ParsedArtifact) -> Self {
        Self {
            id: parsed.field_or("id", "").to_string(),
            persona_id: parsed.field_or("personaId", "").to_string(),
            language: parsed.field_or("language", "English").to_string(),
            writer_ids: parse_writer_ids(parsed.field_or("writerIds", "")),
            model: parsed.field_or("model", "").to_string(),
            description: parsed.field_or("description", "").to_string(),
        }
    }

    /// Render the fenced header block that leads a persisted hub file
    pub fn to_header_block(&self) -> String {
        let mut block = String::from("---\n");
        block.push_str(&format!("id: {}\n", self.id));
        block.push_str(&format!("personaId: {}\n", self.persona_id));
        block.push_str(&format!("language: {}\n", self.language));
        block.push_str(&format!("writerIds: {}\n", self.writer_ids.join(", ")));
        block.push_str(&format!("model: {}\n", self.model));
        if !self.description.is_empty() {
            block.push_str(&format!("description: {}\n", self.description));
        }
        block.push_str("---\n");
        block
    }
}
