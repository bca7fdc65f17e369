//! Completion provider boundary
//!
//! One operation: execute a prompt against a configured model and key.
//! The adapter performs no retries itself; retry policy lives in the
//! orchestrator, where a failed call becomes a retry ask on the
//! interaction channel.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hubloom_core::HubloomError;
use thiserror::Error;

/// Failure of a completion call, carrying the underlying cause
#[derive(Error, Debug)]
#[error("Completion call failed: {cause}")]
pub struct ProviderError {
    pub cause: String,
}

impl ProviderError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

impl From<ProviderError> for HubloomError {
    fn from(e: ProviderError) -> Self {
        HubloomError::Provider(e.cause)
    }
}

/// Per-call completion parameters
#[derive(Debug, Clone)]
pub struct CompletionOptions {
    pub api_key: String,
    pub model: String,
    pub max_tokens: usize,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "claude-sonnet-4".to_string(),
            max_tokens: 8000,
        }
    }
}

impl CompletionOptions {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            ..Self::default()
        }
    }
}

/// Executes one prompt against a text-completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn execute(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}

/// Scripted provider for tests: pops canned responses in order
///
/// Each queued entry is either a response text or a failure cause. An
/// exhausted script fails the call, which makes unexpected extra calls
/// visible in tests.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn respond(self, text: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failure
    pub fn fail(self, cause: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Err(cause.into()));
        self
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Number of scripted entries not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn execute(
        &self,
        prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(cause)) => Err(ProviderError::new(cause)),
            None => Err(ProviderError::new("scripted provider exhausted")),
        }
    }
}
