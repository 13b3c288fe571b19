//! Natural-language scale assistant.
//!
//! The assistant is an opaque text-in/text-out oracle. Its answers are
//! free text that may contain a JSON block like
//! `{"tuning": {"E": -50, "B": -50}}`, which can be applied as a preset.

use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

pub const FALLBACK_ERROR: &str = "Error.";
pub const FALLBACK_EMPTY: &str = "No response.";

#[derive(Debug)]
pub enum AssistantError {
    EmptyQuery,
    Spawn(io::Error),
    Io(io::Error),
    Failed(String),
}

impl fmt::Display for AssistantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistantError::EmptyQuery => write!(f, "empty query"),
            AssistantError::Spawn(e) => write!(f, "could not start assistant: {}", e),
            AssistantError::Io(e) => write!(f, "assistant I/O error: {}", e),
            AssistantError::Failed(msg) => write!(f, "assistant failed: {}", msg),
        }
    }
}

impl Error for AssistantError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AssistantError::Spawn(e) | AssistantError::Io(e) => Some(e),
            _ => None,
        }
    }
}

pub trait Assistant {
    fn ask(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// What the UI shows after a query, plus any tuning it can apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub tunings: Option<Vec<(String, i32)>>,
}

impl Suggestion {
    fn fallback(text: &str) -> Self {
        Suggestion {
            text: text.to_string(),
            tunings: None,
        }
    }
}

pub fn build_prompt(query: &str) -> String {
    format!(
        "User wants to know about this oriental scale: \"{}\".\n\
         Explain its mood and quarter-tones. Be very concise for a small screen.\n\
         JSON tuning format: {{\"tuning\": {{\"E\": -50, \"B\": -50}}}}.",
        query.trim()
    )
}

/// Asks the assistant about `query`. Never fails: errors and empty
/// answers turn into fallback text.
pub fn consult(assistant: &dyn Assistant, query: &str) -> Suggestion {
    if query.trim().is_empty() {
        debug!("Ignoring empty assistant query");
        return Suggestion::fallback("");
    }

    match assistant.ask(&build_prompt(query)) {
        Ok(text) if text.trim().is_empty() => Suggestion::fallback(FALLBACK_EMPTY),
        Ok(text) => {
            let tunings = extract_tuning(&text);
            debug!("Assistant tuning: {:?}", tunings);
            Suggestion { text, tunings }
        }
        Err(e) => {
            warn!("Assistant query failed: {}", e);
            Suggestion::fallback(FALLBACK_ERROR)
        }
    }
}

#[derive(Deserialize)]
struct TuningBlock {
    tuning: BTreeMap<String, i32>,
}

/// Finds the first JSON object in `text` that carries a `tuning` map.
pub fn extract_tuning(text: &str) -> Option<Vec<(String, i32)>> {
    text.match_indices('{').find_map(|(start, _)| {
        let mut values =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<TuningBlock>();
        match values.next() {
            Some(Ok(block)) => Some(block.tuning.into_iter().collect()),
            _ => None,
        }
    })
}

/// Runs an external program per query: the prompt goes to its stdin and
/// its stdout is the answer.
pub struct CommandAssistant {
    program: String,
    args: Vec<String>,
}

impl CommandAssistant {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        CommandAssistant {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line on whitespace. `None` for a blank line.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }
}

impl Assistant for CommandAssistant {
    fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        if prompt.trim().is_empty() {
            return Err(AssistantError::EmptyQuery);
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(AssistantError::Spawn)?;

        // The prompt is fed from its own thread while the output is drained
        // here, so a child that writes before it finishes reading can't
        // fill both pipes.
        let stdin = child.stdin.take();
        let (written, output) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(prompt.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "stdin writer panicked")));
            (written, output)
        });
        let output = output.map_err(AssistantError::Io)?;
        // A child that exits without reading all of its input is judged by
        // its status and output alone.
        if let Err(e) = written {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(AssistantError::Io(e));
            }
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AssistantError::Failed(format!(
                "{} ({})",
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
