//! Artifact integrity checking
//!
//! Verifies a finished hub's structural and referential invariants:
//! persona reference, declared language, pending-work markers, and empty
//! sections. A malformed-but-readable artifact never raises; only an
//! unreadable file propagates an error. Issues come back in document
//! order, not severity order.

use std::path::Path;

use hubloom_core::{parse_artifact, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Literal token marking pending work in a draft
const PENDING_MARKER: &str = "TODO";

/// Outcome of an integrity check; produced fresh per call, never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True iff zero issues were collected
    pub is_valid: bool,
    /// Human-readable issues in document order
    pub issues: Vec<String>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }

    /// A report with no issues
    pub fn clean() -> Self {
        Self::from_issues(Vec::new())
    }
}

/// Check a readable artifact's text against the expected metadata
pub fn check_artifact(
    text: &str,
    expected_persona_id: &str,
    expected_language: &str,
) -> ValidationReport {
    let parsed = parse_artifact(text);
    let mut issues = Vec::new();

    match parsed.field("personaId") {
        None | Some("") => {
            issues.push(format!(
                "Missing persona reference: expected {}",
                expected_persona_id
            ));
        }
        Some(found) if found != expected_persona_id => {
            issues.push(format!(
                "Persona mismatch: expected {}, found {}",
                expected_persona_id, found
            ));
        }
        Some(_) => {}
    }

    let declared_language = parsed.field_or("language", "English");
    if declared_language != expected_language {
        issues.push(format!(
            "Language mismatch: expected {}, declared {}",
            expected_language, declared_language
        ));
    }

    scan_body(&parsed.body, &mut issues);

    debug!("Integrity check collected {} issue(s)", issues.len());
    ValidationReport::from_issues(issues)
}

/// Read an artifact file and check its integrity
///
/// An unreadable file is fatal and propagated unchanged; everything else
/// becomes issues on the report.
pub fn check_integrity(
    path: &Path,
    expected_persona_id: &str,
    expected_language: &str,
) -> Result<ValidationReport> {
    let text = std::fs::read_to_string(path)?;
    Ok(check_artifact(&text, expected_persona_id, expected_language))
}

/// Scan body content for pending-work markers and empty sections
fn scan_body(body: &str, issues: &mut Vec<String>) {
    let mut current_section: Option<String> = None;
    let mut section_has_content = false;

    for line in body.lines() {
        let trimmed = line.trim();

        if let Some(heading) = trimmed.strip_prefix("## ") {
            if let Some(previous) = current_section.take() {
                if !section_has_content {
                    issues.push(format!("Empty section: {}", previous));
                }
            }
            current_section = Some(heading.trim().to_string());
            section_has_content = false;
        }

        // One issue per marker occurrence, heading lines included, with
        // the line for context
        for _ in 0..trimmed.matches(PENDING_MARKER).count() {
            issues.push(format!("Pending work marker: {}", trimmed));
        }

        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            section_has_content = true;
        }
    }

    if let Some(last) = current_section {
        if !section_has_content {
            issues.push(format!("Empty section: {}", last));
        }
    }
}
