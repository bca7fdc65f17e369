//! Agent truths: weighted, learned facts about an agent's observed behavior
//!
//! Truths are appended over an agent's history and consumed, never mutated,
//! by description inference. Prompt inclusion is bounded: the top truths by
//! descending weight, ties broken by insertion order, at most
//! [`MAX_PROMPT_TRUTHS`].

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Maximum number of truths included in an inference prompt
pub const MAX_PROMPT_TRUTHS: usize = 10;

/// A learned fact about an agent's observed behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTruth {
    /// The observation itself
    pub text: String,
    /// Relevance/recency score; higher means more prompt-worthy
    pub weight: f32,
}

impl AgentTruth {
    pub fn new(text: impl Into<String>, weight: f32) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// Append-only log of truths for one agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TruthLog {
    truths: Vec<AgentTruth>,
}

impl TruthLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a truth log from artifact body lines
    ///
    /// Recognized forms: `- [0.8] text` (explicit weight) and `- text`
    /// (weight defaults to 1.0). Non-bullet lines are ignored.
    pub fn parse(body: &str) -> Self {
        let mut log = Self::new();
        for line in body.lines() {
            let Some(entry) = line.trim().strip_prefix("- ") else {
                continue;
            };
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            if let Some(rest) = entry.strip_prefix('[') {
                if let Some((weight_text, text)) = rest.split_once(']') {
                    if let Ok(weight) = weight_text.trim().parse::<f32>() {
                        let text = text.trim();
                        if !text.is_empty() {
                            log.push(AgentTruth::new(text, weight));
                        }
                        continue;
                    }
                }
            }
            log.push(AgentTruth::new(entry, 1.0));
        }
        log
    }

    /// Append a truth to the log
    pub fn push(&mut self, truth: AgentTruth) {
        self.truths.push(truth);
    }

    pub fn len(&self) -> usize {
        self.truths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.truths.is_empty()
    }

    /// The top truths for prompt inclusion: descending weight, stable on
    /// ties, truncated to [`MAX_PROMPT_TRUTHS`]
    pub fn top(&self) -> Vec<&AgentTruth> {
        let mut ranked: Vec<&AgentTruth> = self.truths.iter().collect();
        // sort_by is stable, so equal weights keep insertion order
        ranked.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(MAX_PROMPT_TRUTHS);
        ranked
    }

    /// Build the prompt that asks the provider to infer an agent
    /// description from its observed behavior
    pub fn inferred_description_prompt(&self, agent_name: &str) -> String {
        let mut prompt = String::new();
        prompt.push_str(&format!(
            "Write a one-paragraph description of the agent \"{}\" based on \
             these observed behaviors, most significant first:\n\n",
            agent_name
        ));
        for truth in self.top() {
            prompt.push_str(&format!("- {}\n", truth.text));
        }
        prompt.push_str(
            "\nDescribe what the agent reliably does, not what it should do. \
             Respond with the description only.\n",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with_weights(weights: &[f32]) -> TruthLog {
        let mut log = TruthLog::new();
        for (i, w) in weights.iter().enumerate() {
            log.push(AgentTruth::new(format!("truth-{}", i), *w));
        }
        log
    }

    #[test]
    fn test_top_orders_by_descending_weight() {
        let log = log_with_weights(&[0.2, 0.9, 0.5]);
        let top: Vec<&str> = log.top().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(top, vec!["truth-1", "truth-2", "truth-0"]);
    }

    #[test]
    fn test_top_is_stable_on_ties() {
        let log = log_with_weights(&[0.5, 0.9, 0.5, 0.5]);
        let top: Vec<&str> = log.top().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(top, vec!["truth-1", "truth-0", "truth-2", "truth-3"]);
    }

    #[test]
    fn test_top_truncates_to_limit() {
        let log = log_with_weights(&[1.0; 25]);
        assert_eq!(log.top().len(), MAX_PROMPT_TRUTHS);
    }

    #[test]
    fn test_prompt_never_includes_more_than_limit() {
        let mut log = TruthLog::new();
        for i in 0..30 {
            log.push(AgentTruth::new(format!("observation {}", i), i as f32));
        }
        let prompt = log.inferred_description_prompt("scout");
        let bullet_count = prompt.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(bullet_count, MAX_PROMPT_TRUTHS);
        // Highest-weighted truth comes first
        assert!(prompt.contains("- observation 29\n"));
        assert!(!prompt.contains("- observation 5\n"));
    }

    #[test]
    fn test_parse_weighted_and_bare_bullets() {
        let body = "Notes above the log.\n- [0.8] prefers short sentences\n- always cites sources\n- [not-a-weight] kept verbatim\n";
        let log = TruthLog::parse(body);
        assert_eq!(log.len(), 3);
        assert_eq!(log.top()[0].text, "always cites sources");
        assert!((log.top()[0].weight - 1.0).abs() < f32::EPSILON);
        assert_eq!(log.top()[2].text, "prefers short sentences");
    }

    #[test]
    fn test_parse_ignores_blank_bullets() {
        let log = TruthLog::parse("- \n-\ntext\n");
        assert!(log.is_empty());
    }
}
