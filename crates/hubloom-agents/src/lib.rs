//! # hubloom-agents
//!
//! The role-specialized strategy records of the hubloom pipeline:
//!
//! - [`Persona`]: a voice/tone/language profile applied to all drafting in a hub
//! - [`Writer`]: a drafting strategy applied to one section
//! - [`Assembler`]: a structural strategy constraining which writers may be used
//!
//! Each is a pure value object whose rendering operation performs
//! deterministic template substitution and never fails for well-formed
//! input. The built-in rosters are closed sets of data records; dynamic
//! agents are parsed from stored artifacts by the registry.

mod assembler;
mod persona;
mod truths;
mod writer;

pub use assembler::{builtin_assemblers, Assembler};
pub use persona::{builtin_personas, Persona, RenderContext};
pub use truths::{AgentTruth, TruthLog, MAX_PROMPT_TRUTHS};
pub use writer::{builtin_writers, Writer};
