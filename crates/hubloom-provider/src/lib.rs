//! # hubloom-provider
//!
//! The completion-provider boundary: one `execute(prompt, options)`
//! operation that either returns text or fails with a [`ProviderError`]
//! carrying the underlying cause. Retry policy deliberately lives one
//! layer up, in the orchestrator's interaction loop.

mod http;
mod provider;

pub use http::AnthropicProvider;
pub use provider::{CompletionOptions, CompletionProvider, ProviderError, ScriptedProvider};
