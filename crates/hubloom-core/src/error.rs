//! Unified error types for hubloom

use thiserror::Error;

/// Unified error type for all hubloom operations
#[derive(Error, Debug)]
pub enum HubloomError {
    // Resolution errors
    #[error("Not found: {0}")]
    NotFound(String),

    // Provider errors (transient, eligible for a retry ask)
    #[error("Completion provider failed: {0}")]
    Provider(String),

    // Blueprint errors (routed back through the architect ask)
    #[error("Structural defect: {0}")]
    StructuralDefect(String),

    // Interaction errors
    #[error("Retry budget exceeded: {0}")]
    RetryBudgetExceeded(String),

    #[error("Interaction channel error: {0}")]
    Channel(String),

    // Artifact errors
    #[error("Artifact error: {0}")]
    Artifact(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using HubloomError
pub type Result<T> = std::result::Result<T, HubloomError>;
