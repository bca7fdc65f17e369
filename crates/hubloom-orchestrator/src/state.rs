//! Pure state machine for the hub generation pipeline
//!
//! No async, no I/O: a deterministic transition function the pipeline
//! driver advances as stages complete. Invalid transitions go to Failed,
//! never panic.

/// Pipeline state for one hub generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Architect loop: producing and approving a blueprint
    Planning,
    /// Drafting sections in blueprint order
    Drafting { remaining: usize },
    /// Concatenating drafts under frontmatter
    Assembling,
    /// Checking the assembled artifact's integrity
    Validating,
    /// Finished: artifact and report produced
    Done,
    /// Terminal failure
    Failed { error: String },
}

/// Events that advance the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Blueprint approved with this many sections
    BlueprintApproved { sections: usize },
    /// One section finished drafting or was explicitly marked failed
    SectionClosed,
    /// All drafts concatenated into an artifact
    Assembled,
    /// Integrity check finished (valid or not)
    Validated,
    /// Fatal error
    Error { message: String },
}

/// Advance the pipeline state
///
/// Sections close strictly in blueprint order; assembly is only reachable
/// once every section has been closed.
pub fn transition(state: State, event: Event) -> State {
    match (state, event) {
        (State::Planning, Event::BlueprintApproved { sections }) => {
            if sections == 0 {
                State::Failed {
                    error: "Blueprint approved with no sections".to_string(),
                }
            } else {
                State::Drafting {
                    remaining: sections,
                }
            }
        }

        (State::Drafting { remaining }, Event::SectionClosed) => match remaining {
            0 | 1 => State::Assembling,
            n => State::Drafting { remaining: n - 1 },
        },

        (State::Assembling, Event::Assembled) => State::Validating,

        (State::Validating, Event::Validated) => State::Done,

        (State::Planning, Event::Error { message })
        | (State::Drafting { .. }, Event::Error { message })
        | (State::Assembling, Event::Error { message })
        | (State::Validating, Event::Error { message }) => State::Failed { error: message },

        (state, event) => State::Failed {
            error: format!(
                "Invalid transition: {:?} cannot handle event {:?}",
                state, event
            ),
        },
    }
}
