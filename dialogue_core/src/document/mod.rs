//! Authoring document - the serialized form of a dialogue.
//!
//! A document consists of:
//! - **Defaults**: initial values for the variable store
//! - **Prompts**: conversation nodes, each with its responses, preconditions,
//!   effects and transitions
//!
//! Prompt `0` is the entry point and `-1` is the reserved end-of-dialogue target.

mod loader;

pub use loader::*;

use dialogue_rules::{ConditionDef, EffectDef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::graph::PromptId;

/// A complete dialogue as written by an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueDocument {
    /// Initial variable values.
    #[serde(default)]
    pub defaults: BTreeMap<String, i64>,

    pub prompts: Vec<PromptDef>,
}

/// One conversation node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDef {
    pub id: PromptId,
    pub text: PromptText,
    /// No responses marks the prompt as an ending.
    #[serde(default)]
    pub responses: Vec<ResponseDef>,
}

/// Prompt text: either plain narration or `[speaker, text]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptText {
    Plain(String),
    Lines(Vec<(String, String)>),
}

/// One choice offered at a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseDef {
    pub text: String,

    #[serde(default)]
    pub preconditions: Vec<ConditionDef>,

    #[serde(default)]
    pub effects: Vec<EffectDef>,

    /// Tried in order; the first whose conditions all hold wins.
    pub transitions: Vec<TransitionDef>,
}

/// A conditional edge to another prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionDef {
    pub target: PromptId,

    #[serde(default)]
    pub conditions: Vec<ConditionDef>,
}
