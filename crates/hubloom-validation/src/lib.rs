//! # hubloom-validation
//!
//! Integrity checking for finished hub artifacts: persona and language
//! references, pending-work markers, and structurally empty sections.
//! A non-valid report is data for the caller, never a pipeline failure.

mod integrity;

pub use integrity::{check_artifact, check_integrity, ValidationReport};
