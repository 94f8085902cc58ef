//! Console engine - the read-eval-print loop around a conversation.

use dialogue_core::{Conversation, Payload, SessionError};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ConsoleConfig;

/// Errors from running the console loop.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

/// Why a console run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The dialogue reached its end.
    Finished,
    /// Input ended before the dialogue did.
    InputClosed,
    /// The current prompt has responses but none is on offer.
    NoResponses,
}

/// Drives a conversation over line-based input and output.
pub struct ConsoleEngine<C, R, W> {
    conversation: C,
    input: R,
    output: W,
    config: ConsoleConfig,
}

impl<C, R, W> ConsoleEngine<C, R, W>
where
    C: Conversation,
    R: BufRead,
    W: Write,
{
    pub fn new(conversation: C, input: R, output: W, config: ConsoleConfig) -> Self {
        Self {
            conversation,
            input,
            output,
            config,
        }
    }

    pub fn conversation(&self) -> &C {
        &self.conversation
    }

    /// Give back the conversation and output.
    pub fn into_parts(self) -> (C, W) {
        (self.conversation, self.output)
    }

    /// Play the conversation until it ends or input runs out.
    pub fn run(&mut self) -> Result<RunOutcome, ConsoleError> {
        let width = self.config.wrap_width.max(1);

        loop {
            if self.config.show_globals {
                writeln!(self.output, "(globals: {})", self.conversation.globals())?;
            }

            let Some(payload) = self.conversation.current_prompt() else {
                return Ok(RunOutcome::Finished);
            };
            render_payload(&mut self.output, payload, width)?;

            if self.conversation.is_done() {
                return Ok(RunOutcome::Finished);
            }

            let count = self
                .conversation
                .available_responses()
                .map(|responses| render_responses(&mut self.output, &responses, width))
                .transpose()?
                .unwrap_or(0);

            if count == 0 {
                warn!("no responses on offer at a non-ending prompt");
                return Ok(RunOutcome::NoResponses);
            }

            let Some(choice) = self.read_choice(count)? else {
                debug!("input closed before the dialogue ended");
                return Ok(RunOutcome::InputClosed);
            };

            self.conversation.answer(choice - 1)?;
            if self.conversation.is_done() {
                return Ok(RunOutcome::Finished);
            }
            writeln!(self.output)?;
        }
    }

    /// Read a 1-based choice, asking again until it is valid. `None` at end of input.
    fn read_choice(&mut self, count: usize) -> Result<Option<usize>, ConsoleError> {
        let mut line = String::new();
        loop {
            write!(self.output, "{}", self.config.input_marker)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim().parse::<i64>() {
                Err(_) => writeln!(
                    self.output,
                    "Response must be an int between 1 and {}",
                    count
                )?,
                Ok(n) if n < 1 || n as u64 > count as u64 => {
                    writeln!(self.output, "Response must be between 1 and {}", count)?
                }
                Ok(n) => return Ok(Some(n as usize)),
            }
        }
    }
}

fn render_payload<W: Write>(
    output: &mut W,
    payload: &Payload,
    width: usize,
) -> std::io::Result<()> {
    for line in payload.iter() {
        writeln!(output, "{}", textwrap::fill(&line.to_string(), width))?;
    }
    Ok(())
}

/// Print numbered responses and return how many there are.
fn render_responses<W: Write>(
    output: &mut W,
    responses: &[&str],
    width: usize,
) -> std::io::Result<usize> {
    for (i, text) in responses.iter().enumerate() {
        let entry = format!("{}) {}", i + 1, text);
        let options = textwrap::Options::new(width).subsequent_indent("   ");
        writeln!(output, "{}", textwrap::fill(&entry, options))?;
    }
    Ok(responses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogue_core::{Dialogue, DialogueDocument};
    use std::io::Cursor;

    const DOC: &str = r#"{
        "defaults": {"trust": 0},
        "prompts": [
            {"id": 0, "text": [["Guard", "Halt! Who goes there?"]], "responses": [
                {"text": "A friend",
                 "effects": [{"variable": "trust", "operation": "+", "value": 1}],
                 "transitions": [{"target": 1}]},
                {"text": "None of your business",
                 "transitions": [{"target": -1}]}
            ]},
            {"id": 1, "text": "The guard waves you through."}
        ]
    }"#;

    fn dialogue() -> Dialogue {
        Dialogue::from_document(DialogueDocument::from_json_str(DOC).unwrap()).unwrap()
    }

    fn play(input: &str, config: ConsoleConfig) -> (RunOutcome, Dialogue, String) {
        let input = Cursor::new(input.to_string());
        let mut engine = ConsoleEngine::new(dialogue(), input, Vec::new(), config);
        let outcome = engine.run().unwrap();
        let (dialogue, output) = engine.into_parts();
        (outcome, dialogue, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_plays_to_the_end() {
        let (outcome, dialogue, output) = play("1\n", ConsoleConfig::default());

        assert_eq!(outcome, RunOutcome::Finished);
        assert!(dialogue.is_done());
        assert_eq!(dialogue.globals().get("trust"), 1);
        assert_eq!(
            output,
            "(globals: trust=0)\n\
             Guard: Halt! Who goes there?\n\
             1) A friend\n\
             2) None of your business\n\
             > \n\
             (globals: trust=1)\n\
             The guard waves you through.\n"
        );
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let config = ConsoleConfig::default().with_show_globals(false);
        let (outcome, _, output) = play("abc\n0\n3\n2\n", config);

        assert_eq!(outcome, RunOutcome::Finished);
        assert!(output.contains("Response must be an int between 1 and 2\n"));
        assert_eq!(output.matches("Response must be between 1 and 2\n").count(), 2);
        assert!(!output.contains("globals"));
    }

    #[test]
    fn test_input_closed() {
        let (outcome, dialogue, _) = play("", ConsoleConfig::default());
        assert_eq!(outcome, RunOutcome::InputClosed);
        assert!(!dialogue.is_done());
    }

    #[test]
    fn test_wraps_text() {
        let config = ConsoleConfig::default()
            .with_wrap_width(12)
            .with_show_globals(false);
        let (_, _, output) = play("2\n", config);

        assert!(output.starts_with("Guard: Halt!\nWho goes\nthere?\n"));
        assert!(output.contains("2) None of\n   your\n   business\n"));
    }

    #[test]
    fn test_no_responses_on_offer() {
        let doc = r#"{"prompts": [{"id": 0, "text": "Locked.", "responses": [
            {"text": "Open", "preconditions": [{"variable": "key", "operation": "set"}],
             "transitions": [{"target": -1}]}
        ]}]}"#;
        let dialogue =
            Dialogue::from_document(DialogueDocument::from_json_str(doc).unwrap()).unwrap();
        let mut engine = ConsoleEngine::new(
            dialogue,
            Cursor::new(String::new()),
            Vec::new(),
            ConsoleConfig::default(),
        );
        assert_eq!(engine.run().unwrap(), RunOutcome::NoResponses);
    }
}
