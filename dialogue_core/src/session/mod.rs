//! Dialogue session - the state machine that walks one conversation.
//!
//! A session moves through the graph one answer at a time:
//! 1. **Show**: the adapter reads the current prompt's payload
//! 2. **Offer**: responses are filtered by their preconditions
//! 3. **Answer**: the caller picks an index into the filtered list
//! 4. **Apply**: the chosen response's effects mutate the store in order
//! 5. **Advance**: the first satisfied transition picks the next prompt, or ends the dialogue

mod conversation;

pub use conversation::*;

use dialogue_rules::Globals;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::document::DialogueDocument;
use crate::error::{AuthoringError, SessionError};
use crate::graph::{DialogueGraph, Payload, PromptId};

/// Unique identifier for a dialogue session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of a session in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Active(PromptId),
    /// Permanent once reached.
    Done,
}

/// One conversation in progress.
///
/// The session owns its variable store and its graph, so independent sessions share
/// nothing and may live on different threads.
#[derive(Debug, Clone)]
pub struct Dialogue {
    id: SessionId,
    globals: Globals,
    graph: DialogueGraph,
    state: SessionState,
}

impl Dialogue {
    /// Start a session at the entry prompt of a validated graph.
    pub fn new(graph: DialogueGraph, globals: Globals) -> Self {
        let id = SessionId::new();
        info!(session = %id, prompts = graph.prompt_count(), "dialogue started");
        Self {
            id,
            globals,
            graph,
            state: SessionState::Active(PromptId::ENTRY),
        }
    }

    /// Build a session from an authoring document.
    pub fn from_document(document: DialogueDocument) -> Result<Self, AuthoringError> {
        let globals = Globals::with_defaults(document.defaults);
        let graph = DialogueGraph::from_defs(document.prompts)?;
        Ok(Self::new(graph, globals))
    }

    /// Load a document from disk and build a session from it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AuthoringError> {
        Self::from_document(DialogueDocument::load(path)?)
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn graph(&self) -> &DialogueGraph {
        &self.graph
    }

    /// Whether there is nothing left to do in the dialogue.
    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }

    /// The prompt the session is at, or `None` once done.
    pub fn current_prompt_id(&self) -> Option<PromptId> {
        match self.state {
            SessionState::Active(id) => Some(id),
            SessionState::Done => None,
        }
    }

    /// The payload of the current prompt, or `None` once done.
    ///
    /// Reaching a prompt with no responses finishes the session, but its payload is
    /// still returned by this call.
    pub fn current_prompt(&mut self) -> Option<&Payload> {
        let SessionState::Active(id) = self.state else {
            return None;
        };
        let prompt = self.graph.prompt(id)?;
        if prompt.is_terminal() {
            self.state = SessionState::Done;
            info!(session = %self.id, prompt = %id, "dialogue finished at ending prompt");
        }
        Some(prompt.payload())
    }

    /// Texts of the responses currently on offer, in declared order, or `None` once done.
    ///
    /// The position of a text in this list is the index [`Dialogue::answer`] expects.
    pub fn available_responses(&self) -> Option<Vec<&str>> {
        let id = self.current_prompt_id()?;
        let prompt = self.graph.prompt(id)?;
        Some(prompt.response_texts(&self.globals))
    }

    /// Answer the current prompt with an index into [`Dialogue::available_responses`].
    ///
    /// Usage errors are raised before anything changes. If an effect fails, effects of
    /// the chosen response applied before it stay applied and the session does not move.
    pub fn answer(&mut self, choice: usize) -> Result<(), SessionError> {
        let current = match self.state {
            SessionState::Active(id) => id,
            SessionState::Done => {
                warn!(session = %self.id, choice, "answer on finished dialogue");
                return Err(SessionError::Finished);
            }
        };

        // Validated graphs contain every reachable prompt.
        let Some(prompt) = self.graph.prompt_mut(current) else {
            self.state = SessionState::Done;
            return Err(SessionError::Finished);
        };

        let active = prompt.active_indices(&self.globals);
        let Some(&index) = active.get(choice) else {
            warn!(
                session = %self.id,
                choice,
                available = active.len(),
                "choice out of range"
            );
            return Err(SessionError::ChoiceOutOfRange {
                choice,
                available: active.len(),
            });
        };

        let response = &mut prompt.responses_mut()[index];
        if let Err(err) = response.apply_effects(&mut self.globals) {
            warn!(session = %self.id, prompt = %current, error = %err, "effect failed");
            return Err(err.into());
        }

        let next = response.next_prompt_id(&self.globals);
        debug!(
            session = %self.id,
            from = %current,
            to = %next,
            response = response.text(),
            "resolved transition"
        );

        if next.is_terminal() {
            self.state = SessionState::Done;
            info!(session = %self.id, "dialogue finished");
        } else {
            self.state = SessionState::Active(next);
        }
        Ok(())
    }

    /// Read-only view of the variable store.
    pub fn globals(&self) -> &Globals {
        &self.globals
    }
}
