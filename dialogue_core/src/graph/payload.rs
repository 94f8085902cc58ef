//! Prompt payloads - what a prompt shows the player.

use serde::{Deserialize, Serialize};

use crate::document::PromptText;

/// One line of prompt text, optionally attributed to a speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub speaker: Option<String>,
    pub text: String,
}

impl Line {
    /// A line with no speaker.
    pub fn narration(text: impl Into<String>) -> Self {
        Self {
            speaker: None,
            text: text.into(),
        }
    }

    /// A line spoken by a named speaker.
    pub fn spoken(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: Some(speaker.into()),
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.speaker {
            Some(speaker) => write!(f, "{}: {}", speaker, self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

/// The display content of a prompt. Plain text is a single unattributed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Payload(pub Vec<Line>);

impl Payload {
    pub fn lines(&self) -> &[Line] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Line> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<PromptText> for Payload {
    fn from(text: PromptText) -> Self {
        match text {
            PromptText::Plain(text) => Payload(vec![Line::narration(text)]),
            PromptText::Lines(pairs) => Payload(
                pairs
                    .into_iter()
                    .map(|(speaker, text)| Line::spoken(speaker, text))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload(vec![Line::narration(text)])
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload(vec![Line::narration(text)])
    }
}

impl From<Vec<Line>> for Payload {
    fn from(lines: Vec<Line>) -> Self {
        Payload(lines)
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
