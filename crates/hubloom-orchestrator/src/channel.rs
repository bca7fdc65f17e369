//! Interaction channel: the typed ask/respond boundary for human decisions
//!
//! One polymorphic ask operation keyed by interaction kind. The pipeline
//! suspends on every ask until a reply arrives; there is no concurrent
//! pipeline activity for a hub during the wait. Canceling is always a
//! feedback or declined-retry reply, never an out-of-band interrupt.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use hubloom_core::{HubBlueprint, HubloomError, Result};

/// A question put to the human, keyed by pipeline stage
#[derive(Debug, Clone)]
pub enum Ask {
    /// Review the Architect's proposed blueprint; `defect` carries a
    /// structural-defect notice when the blueprint was rejected
    Architect {
        blueprint: HubBlueprint,
        defect: Option<String>,
    },
    /// Review the selected structural strategy
    Assembler { id: String, description: String },
    /// Review the selected voice profile
    Persona { id: String, description: String },
    /// Decide whether to retry the immediately preceding provider call
    Retry { failure: String },
}

impl Ask {
    /// Stable kind label, used for logging and scripted-channel assertions
    pub fn kind(&self) -> &'static str {
        match self {
            Ask::Architect { .. } => "architect",
            Ask::Assembler { .. } => "assembler",
            Ask::Persona { .. } => "persona",
            Ask::Retry { .. } => "retry",
        }
    }
}

/// The human's reply to an ask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Accept and advance
    Proceed,
    /// Reject with free-text guidance; must be non-empty
    Feedback(String),
    /// Answer to a retry ask
    Retry(bool),
}

/// A validated review reply (architect/assembler/persona asks)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Review {
    Proceed,
    Feedback(String),
}

/// Coerce a reply to the review shape
pub fn expect_review(reply: Reply) -> Result<Review> {
    match reply {
        Reply::Proceed => Ok(Review::Proceed),
        Reply::Feedback(text) if !text.trim().is_empty() => Ok(Review::Feedback(text)),
        Reply::Feedback(_) => Err(HubloomError::Channel(
            "feedback requires a non-empty string".to_string(),
        )),
        Reply::Retry(_) => Err(HubloomError::Channel(
            "retry reply given to a review ask".to_string(),
        )),
    }
}

/// Coerce a reply to the retry shape
pub fn expect_retry(reply: Reply) -> Result<bool> {
    match reply {
        Reply::Retry(decision) => Ok(decision),
        other => Err(HubloomError::Channel(format!(
            "retry ask answered with {:?}",
            other
        ))),
    }
}

/// Synchronous request/response boundary for human decisions
#[async_trait]
pub trait InteractionChannel: Send + Sync {
    async fn ask(&self, ask: Ask) -> Result<Reply>;
}

/// Scripted channel for tests: pops replies in order, records ask kinds
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    replies: Mutex<VecDeque<Reply>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply
    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    /// Kind labels of the asks received so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl InteractionChannel for ScriptedChannel {
    async fn ask(&self, ask: Ask) -> Result<Reply> {
        self.asked.lock().unwrap().push(ask.kind().to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HubloomError::Channel("scripted channel exhausted".to_string()))
    }
}
