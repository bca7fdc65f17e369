//! # hubloom-core
//!
//! Core types for the hubloom content-hub generation pipeline.
//!
//! A hub is a multi-section written document produced by coordinating
//! role-specialized prompt agents against a completion provider, with a
//! human approving, retrying, or redirecting at every stage.
//!
//! ## Core paradigm
//!
//! - Blueprints ARE the plan (section order and writer assignments are fixed
//!   once approved)
//! - Agents ARE data (closed sets of strategy records, no virtual dispatch)
//! - Artifacts ARE files (a structured header block plus free-text body)
//! - Human decisions ARE typed channel replies (proceed/feedback/retry)

mod artifact;
mod config;
mod error;
mod types;

pub use artifact::{parse_artifact, parse_writer_ids, ContentFrontmatter, ParsedArtifact};
pub use config::{HubloomConfig, ModelConfig, PipelineDefaults};
pub use error::{HubloomError, Result};
pub use types::*;
