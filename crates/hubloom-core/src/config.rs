//! Configuration management for hubloom
//!
//! Workspace-level settings loaded from `.hubloom/config.toml`: model
//! selection, API key environment variable, default language, and the
//! attempt budget applied to feedback and retry loops.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{HubloomError, Result};

/// Workspace-level hubloom configuration
///
/// Loaded from `.hubloom/config.toml` in the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubloomConfig {
    /// Model selection
    #[serde(default)]
    pub models: ModelConfig,

    /// Pipeline defaults
    #[serde(default)]
    pub pipeline: PipelineDefaults,
}

/// Model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Default model to use
    #[serde(default = "default_model")]
    pub default: String,

    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

/// Default pipeline parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDefaults {
    /// Attempt budget for feedback and retry loops
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Default target language when a request does not set one
    #[serde(default = "default_language")]
    pub language: String,
}

// Default value providers
fn default_model() -> String {
    "claude-sonnet-4".to_string()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_max_tokens() -> usize {
    8000
}

fn default_max_attempts() -> usize {
    5
}

fn default_language() -> String {
    "English".to_string()
}

impl HubloomConfig {
    /// Load configuration from `.hubloom/config.toml` or use defaults
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(".hubloom/config.toml");

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)
                .map_err(|e| HubloomError::Other(format!("Failed to parse config file: {}", e)))
        } else {
            Ok(Self::default())
        }
    }

    /// Write default configuration to `.hubloom/config.toml`
    pub fn write_default(root: &Path) -> Result<()> {
        let config_dir = root.join(".hubloom");
        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| HubloomError::Other(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

impl Default for HubloomConfig {
    fn default() -> Self {
        Self {
            models: ModelConfig::default(),
            pipeline: PipelineDefaults::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            language: default_language(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubloomConfig::default();
        assert_eq!(config.models.default, "claude-sonnet-4");
        assert_eq!(config.models.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.pipeline.max_attempts, 5);
        assert_eq!(config.pipeline.language, "English");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = HubloomConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.pipeline.max_attempts, 5);
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        HubloomConfig::write_default(dir.path()).unwrap();
        let config = HubloomConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.models.default, "claude-sonnet-4");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".hubloom");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[models]\ndefault = \"claude-opus-4\"\n",
        )
        .unwrap();

        let config = HubloomConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.models.default, "claude-opus-4");
        assert_eq!(config.models.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.pipeline.max_attempts, 5);
    }
}
