//! Dialogue graph - validated prompts connected by response transitions.
//!
//! The graph consists of:
//! - **Prompts**: nodes holding a payload and ordered responses
//! - **Responses**: choices with preconditions, effects and transitions
//! - **Transitions**: conditional edges to other prompts or to the end

mod payload;
mod prompt;
mod response;

pub use payload::*;
pub use prompt::*;
pub use response::*;

use dialogue_rules::{Condition, ConditionDef, Effect, ExpressionError};
use std::collections::HashMap;

use crate::document::{PromptDef, ResponseDef};
use crate::error::AuthoringError;

/// All prompts of one dialogue, checked to form a walkable graph.
///
/// A graph always contains [`PromptId::ENTRY`], never uses [`PromptId::TERMINAL`] as a
/// prompt id, and every transition targets an existing prompt or the terminal sentinel.
#[derive(Debug, Clone)]
pub struct DialogueGraph {
    prompts: HashMap<PromptId, Prompt>,
}

impl DialogueGraph {
    /// Build a graph from prompts, validating its structure.
    pub fn from_prompts(prompts: impl IntoIterator<Item = Prompt>) -> Result<Self, AuthoringError> {
        let mut by_id = HashMap::new();
        for prompt in prompts {
            let id = prompt.id();
            if id.is_terminal() {
                return Err(AuthoringError::ReservedPromptId);
            }
            if by_id.insert(id, prompt).is_some() {
                return Err(AuthoringError::DuplicatePromptId(id));
            }
        }

        let graph = Self { prompts: by_id };
        graph.validate()?;
        Ok(graph)
    }

    /// Build a graph from authored prompt definitions.
    pub fn from_defs(defs: Vec<PromptDef>) -> Result<Self, AuthoringError> {
        let prompts = defs
            .into_iter()
            .map(build_prompt)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_prompts(prompts)
    }

    fn validate(&self) -> Result<(), AuthoringError> {
        if !self.prompts.contains_key(&PromptId::ENTRY) {
            return Err(AuthoringError::MissingEntryPrompt);
        }

        // Sorted so the first reported problem is stable.
        for id in self.ids() {
            let prompt = &self.prompts[&id];
            for (index, response) in prompt.responses().iter().enumerate() {
                if response.transitions().is_empty() {
                    return Err(AuthoringError::EmptyTransitions {
                        prompt: id,
                        response: index,
                    });
                }
                for transition in response.transitions() {
                    let target = transition.target();
                    if !target.is_terminal() && !self.prompts.contains_key(&target) {
                        return Err(AuthoringError::UnknownTransitionTarget {
                            prompt: id,
                            response: index,
                            target,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Get prompt by ID.
    pub fn prompt(&self, id: PromptId) -> Option<&Prompt> {
        self.prompts.get(&id)
    }

    pub(crate) fn prompt_mut(&mut self, id: PromptId) -> Option<&mut Prompt> {
        self.prompts.get_mut(&id)
    }

    /// Check if a prompt exists.
    pub fn contains(&self, id: PromptId) -> bool {
        self.prompts.contains_key(&id)
    }

    /// All prompt ids, sorted.
    pub fn ids(&self) -> Vec<PromptId> {
        let mut ids: Vec<_> = self.prompts.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Get the total number of prompts.
    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }
}

fn build_prompt(def: PromptDef) -> Result<Prompt, AuthoringError> {
    let id = def.id;
    let mut prompt = Prompt::new(id, def.text);
    for (index, response) in def.responses.into_iter().enumerate() {
        let response = build_response(response).map_err(|source| AuthoringError::Expression {
            prompt: id,
            response: index,
            source,
        })?;
        prompt = prompt.with_response(response);
    }
    Ok(prompt)
}

fn build_response(def: ResponseDef) -> Result<Response, ExpressionError> {
    let mut response = Response::new(def.text);
    for condition in build_conditions(def.preconditions)? {
        response = response.with_precondition(condition);
    }
    for effect in def.effects {
        response = response.with_effect(Effect::try_from(effect)?);
    }
    for transition in def.transitions {
        let mut edge = Transition::new(transition.target);
        for condition in build_conditions(transition.conditions)? {
            edge = edge.with_condition(condition);
        }
        response = response.with_transition(edge);
    }
    Ok(response)
}

fn build_conditions(defs: Vec<ConditionDef>) -> Result<Vec<Condition>, ExpressionError> {
    defs.into_iter().map(Condition::try_from).collect()
}
