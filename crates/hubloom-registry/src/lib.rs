//! # hubloom-registry
//!
//! Resolves agent ids to Persona/Writer/Assembler instances. Two
//! resolution paths per role family: a fixed table of built-in instances,
//! and a dynamic path that parses artifact files from an external store
//! (one folder per role). Also exposes the manifest of available tools
//! that the Architect step selects from.

mod registry;
mod store;

pub use registry::{Manifest, ManifestEntry, Registry};
pub use store::{id_from_filename, ArtifactStore, MemoryStore, Role};
