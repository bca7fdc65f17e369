//! # hubloom-orchestrator
//!
//! The hub generation pipeline: Architect planning with a human
//! approve/retry/feedback loop, per-section drafting fan-out, assembly,
//! and integrity validation. The pipeline is single-flow per hub request;
//! every suspension point is a synchronous wait on either the completion
//! provider or the interaction channel. Independent runs share only the
//! read side of the registry.

mod channel;
mod pipeline;
mod prompt;
mod state;

pub use channel::{
    expect_retry, expect_review, Ask, InteractionChannel, Reply, Review, ScriptedChannel,
};
pub use pipeline::{HubRunResult, Pipeline, RunConfig};
pub use prompt::{build_architect_prompt, build_section_prompt};
pub use state::{transition, Event, State};
