//! The interface presentation adapters drive a conversation through.

use dialogue_rules::Globals;

use super::Dialogue;
use crate::error::SessionError;
use crate::graph::Payload;

/// What a presentation adapter needs from a conversation.
///
/// Adapters own all input, output and layout. The conversation never prints or
/// reads anything.
pub trait Conversation {
    /// Whether there is nothing left to show or answer.
    fn is_done(&self) -> bool;

    /// Payload of the current prompt, or `None` once done.
    fn current_prompt(&mut self) -> Option<&Payload>;

    /// Texts of the responses currently on offer, or `None` once done.
    fn available_responses(&self) -> Option<Vec<&str>>;

    /// Answer with an index into [`Conversation::available_responses`].
    fn answer(&mut self, choice: usize) -> Result<(), SessionError>;

    /// Read-only view of the variable store.
    fn globals(&self) -> &Globals;
}

impl Conversation for Dialogue {
    fn is_done(&self) -> bool {
        Dialogue::is_done(self)
    }

    fn current_prompt(&mut self) -> Option<&Payload> {
        Dialogue::current_prompt(self)
    }

    fn available_responses(&self) -> Option<Vec<&str>> {
        Dialogue::available_responses(self)
    }

    fn answer(&mut self, choice: usize) -> Result<(), SessionError> {
        Dialogue::answer(self, choice)
    }

    fn globals(&self) -> &Globals {
        Dialogue::globals(self)
    }
}
