//! Prompt definitions - nodes in the dialogue graph.

use dialogue_rules::Globals;
use serde::{Deserialize, Serialize};

use super::{Payload, Response};

/// Identifier of a prompt within one dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(pub i64);

impl PromptId {
    /// Where every dialogue starts.
    pub const ENTRY: PromptId = PromptId(0);

    /// Transition target meaning "end of dialogue". Never a real prompt.
    pub const TERMINAL: PromptId = PromptId(-1);

    pub fn is_terminal(&self) -> bool {
        *self == Self::TERMINAL
    }
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One conversation node: what is shown and what can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    id: PromptId,
    payload: Payload,
    responses: Vec<Response>,
}

impl Prompt {
    /// Create a prompt with no responses.
    pub fn new(id: PromptId, payload: impl Into<Payload>) -> Self {
        Self {
            id,
            payload: payload.into(),
            responses: Vec::new(),
        }
    }

    /// Add a response, offered after those already added.
    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    pub fn id(&self) -> PromptId {
        self.id
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// All responses in declared order, including inactive ones.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    /// A prompt with no responses ends the dialogue.
    pub fn is_terminal(&self) -> bool {
        self.responses.is_empty()
    }

    /// Responses whose preconditions currently hold, in declared order.
    pub fn active_responses<'a>(
        &'a self,
        globals: &'a Globals,
    ) -> impl Iterator<Item = &'a Response> + 'a {
        self.responses.iter().filter(move |r| r.is_active(globals))
    }

    /// Texts of the currently active responses.
    pub fn response_texts(&self, globals: &Globals) -> Vec<&str> {
        self.responses
            .iter()
            .filter(|r| r.is_active(globals))
            .map(|r| r.text())
            .collect()
    }

    /// Positions in [`Prompt::responses`] of the currently active responses.
    pub fn active_indices(&self, globals: &Globals) -> Vec<usize> {
        self.responses
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_active(globals))
            .map(|(i, _)| i)
            .collect()
    }

    pub(crate) fn responses_mut(&mut self) -> &mut [Response] {
        &mut self.responses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Transition;
    use dialogue_rules::{Condition, ConditionOp};

    fn gated_prompt() -> Prompt {
        Prompt::new(PromptId(0), "Well?")
            .with_response(Response::new("Hello").with_transition(Transition::new(PromptId(1))))
            .with_response(
                Response::new("Old friend!")
                    .with_precondition(Condition::compare("trust", ConditionOp::GreaterOrEqual, 5))
                    .with_transition(Transition::new(PromptId(2))),
            )
            .with_response(
                Response::new("Goodbye").with_transition(Transition::new(PromptId::TERMINAL)),
            )
    }

    #[test]
    fn test_prompt_id_constants() {
        assert!(PromptId::TERMINAL.is_terminal());
        assert!(!PromptId::ENTRY.is_terminal());
        assert_eq!(PromptId(7).to_string(), "7");
    }

    #[test]
    fn test_terminal_prompt() {
        assert!(Prompt::new(PromptId(9), "The end.").is_terminal());
        assert!(!gated_prompt().is_terminal());
    }

    #[test]
    fn test_filtered_responses_keep_order() {
        let prompt = gated_prompt();
        let mut globals = Globals::new();

        assert_eq!(prompt.response_texts(&globals), vec!["Hello", "Goodbye"]);
        assert_eq!(prompt.active_indices(&globals), vec![0, 2]);

        globals.set("trust", 5);
        assert_eq!(
            prompt.response_texts(&globals),
            vec!["Hello", "Old friend!", "Goodbye"]
        );
        assert_eq!(prompt.active_indices(&globals), vec![0, 1, 2]);
    }
}
