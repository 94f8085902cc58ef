//! Error types for loading documents and driving sessions.

use dialogue_rules::ExpressionError;
use std::path::PathBuf;
use thiserror::Error;

use crate::graph::PromptId;

/// Errors from reading an authoring document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported document format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// Errors in dialogue content. A session cannot be built from content that raises one.
#[derive(Debug, Error)]
pub enum AuthoringError {
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    #[error("no entry prompt with id {}", PromptId::ENTRY)]
    MissingEntryPrompt,

    #[error("prompt id {0} is declared more than once")]
    DuplicatePromptId(PromptId),

    #[error("prompt id {} is reserved for the end of the dialogue", PromptId::TERMINAL)]
    ReservedPromptId,

    #[error("response {response} of prompt {prompt} has no transitions")]
    EmptyTransitions { prompt: PromptId, response: usize },

    #[error("response {response} of prompt {prompt} transitions to unknown prompt {target}")]
    UnknownTransitionTarget {
        prompt: PromptId,
        response: usize,
        target: PromptId,
    },

    #[error("invalid expression in response {response} of prompt {prompt}: {source}")]
    Expression {
        prompt: PromptId,
        response: usize,
        source: ExpressionError,
    },
}

/// Errors from driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the dialogue is already finished")]
    Finished,

    #[error("choice {choice} is out of range ({available} responses available)")]
    ChoiceOutOfRange { choice: usize, available: usize },

    #[error("effect evaluation failed: {0}")]
    Evaluation(#[from] ExpressionError),
}

impl SessionError {
    /// Whether the caller broke the session contract, as opposed to the content failing.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            SessionError::Finished | SessionError::ChoiceOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_errors() {
        assert!(SessionError::Finished.is_usage_error());
        assert!(SessionError::ChoiceOutOfRange {
            choice: 3,
            available: 1
        }
        .is_usage_error());
        assert!(!SessionError::Evaluation(ExpressionError::DivisionByZero {
            expression: "1/0".to_string()
        })
        .is_usage_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            AuthoringError::MissingEntryPrompt.to_string(),
            "no entry prompt with id 0"
        );
        assert_eq!(
            AuthoringError::UnknownTransitionTarget {
                prompt: PromptId(2),
                response: 0,
                target: PromptId(9),
            }
            .to_string(),
            "response 0 of prompt 2 transitions to unknown prompt 9"
        );
    }
}
