//! Text protocol spoken by `CameraControlRemoteCmd.exe`.
//!
//! Commands are single lines of the form `<verb> <param> [value...]`:
//!
//! ```text
//! get iso
//! set session.name my session
//! list shutterspeed
//! do LiveViewWnd_Show
//! ```
//!
//! The relay prints plain text. There is no schema; responses are told apart
//! by markers:
//!
//! ```text
//! response:"1/125";                      scalar value
//! response:["100","200","400"];          list value
//! :;response:error;message:No such property
//! ```
//!
//! Error detection is a substring search for `error` anywhere in the text.
//! That is coarse (a value containing "error" is misread as a failure) but it
//! is what the application's own clients do, so it is kept as-is.
//!
//! CHANGELOG:
//! - 10/17/2026 - Moved all marker parsing into this module

use std::fmt;

use crate::error::{CameraError, CameraResult};

/// Substring that marks a failed command.
pub const ERROR_MARKER: &str = "error";

/// Marker preceding the human-readable error reason.
pub const MESSAGE_MARKER: &str = "message:";

/// Marker preceding the returned value.
pub const RESPONSE_MARKER: &str = "response:";

/// Verbs accepted by the relay as the first word of a raw command line.
pub const SINGLE_LINE_VERBS: [&str; 5] = ["get", "set", "list", "capture", "do"];

/// Protocol operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Set,
    List,
    Do,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Set => "set",
            Verb::List => "list",
            Verb::Do => "do",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One command line handed to the relay after `/c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: String,
}

impl Command {
    /// Build `<verb> <target> [args...]`, space-joining multi-word values.
    pub fn new<S: AsRef<str>>(verb: Verb, target: &str, args: &[S]) -> Self {
        Self::bare(&format!("{} {}", verb, target), args)
    }

    /// A command word sent without a verb prefix, e.g. `Capture` or
    /// `CaptureNoAf`. Empty arguments are dropped.
    pub fn bare<S: AsRef<str>>(head: &str, args: &[S]) -> Self {
        let mut text = head.to_string();
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                text.push(' ');
                text.push_str(arg);
            }
        }
        Self { text }
    }

    pub fn get(param: &str) -> Self {
        Self::new::<&str>(Verb::Get, param, &[])
    }

    /// `set <param> <value>`. The value is always sent, so an empty value
    /// leaves a trailing space (`set session.name `) and clears the property.
    pub fn set(param: &str, value: &str) -> Self {
        Self {
            text: format!("{} {} {}", Verb::Set, param, value),
        }
    }

    pub fn list(param: &str) -> Self {
        Self::new::<&str>(Verb::List, param, &[])
    }

    pub fn action<S: AsRef<str>>(name: &str, args: &[S]) -> Self {
        Self::new(Verb::Do, name, args)
    }

    /// Validate a free-form command line.
    ///
    /// Only the first word is checked against [`SINGLE_LINE_VERBS`]; the rest
    /// is passed through untouched.
    pub fn single_line(text: &str) -> CameraResult<Self> {
        let text = text.trim();
        let verb = text.split_whitespace().next().unwrap_or("");
        if !SINGLE_LINE_VERBS.contains(&verb) {
            return Err(CameraError::InvalidCommand {
                verb: verb.to_string(),
                expected: SINGLE_LINE_VERBS.join(", "),
            });
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ============================================================================
// Response parsing
// ============================================================================

/// True if the raw text contains the error marker anywhere.
pub fn is_error(raw: &str) -> bool {
    raw.contains(ERROR_MARKER)
}

/// Extract the error reason: text after `message:` up to the next line break.
///
/// Falls back to the whole trimmed response when the marker is missing so the
/// caller always has something to report.
pub fn error_message(raw: &str) -> String {
    match raw.split(MESSAGE_MARKER).nth(1) {
        Some(segment) => segment
            .trim_start_matches(['\r', '\n'])
            .split(['\r', '\n'])
            .next()
            .unwrap_or("")
            .to_string(),
        None => raw.trim().to_string(),
    }
}

/// Segment between the first `response:` marker and the next one (or the end).
fn response_body(raw: &str) -> Option<&str> {
    raw.split(RESPONSE_MARKER).nth(1)
}

fn fail_on_error(command: &Command, raw: &str) -> CameraResult<()> {
    if is_error(raw) {
        return Err(CameraError::Protocol {
            command: command.to_string(),
            message: error_message(raw),
        });
    }
    Ok(())
}

fn missing_marker(command: &Command, raw: &str) -> CameraError {
    CameraError::InvalidResponse {
        command: command.to_string(),
        detail: format!("no `{}` marker in {:?}", RESPONSE_MARKER, raw.trim()),
    }
}

/// Parse a scalar reply (`get`/`set`).
///
/// `response:"1/125";\r\n` yields `1/125`: surrounding quotes, semicolons and
/// line breaks are trimmed; inner characters are left alone.
pub fn parse_value(command: &Command, raw: &str) -> CameraResult<String> {
    fail_on_error(command, raw)?;
    let body = response_body(raw).ok_or_else(|| missing_marker(command, raw))?;
    Ok(body
        .trim_matches(|c: char| matches!(c, '"' | ';' | '\r' | '\n'))
        .to_string())
}

/// Parse a list reply (`list`).
///
/// `response:["100","200","400"];\r\n` yields the three values in protocol
/// order. An empty list body yields an empty vector.
pub fn parse_list(command: &Command, raw: &str) -> CameraResult<Vec<String>> {
    fail_on_error(command, raw)?;
    let body = response_body(raw).ok_or_else(|| missing_marker(command, raw))?;
    let body = body
        .trim_matches(|c: char| matches!(c, '[' | ']' | ';' | '\r' | '\n'))
        .replace('"', "");
    if body.is_empty() {
        return Ok(Vec::new());
    }
    Ok(body.split(',').map(str::to_string).collect())
}

/// Parse the reply to a `do` action.
///
/// Actions usually answer with an empty `response:`; a reply without the
/// marker is treated as an empty body rather than a failure.
pub fn parse_action(command: &Command, raw: &str) -> CameraResult<String> {
    fail_on_error(command, raw)?;
    Ok(response_body(raw)
        .map(|body| {
            body.trim_matches(|c: char| matches!(c, '"' | ';' | '\r' | '\n'))
                .to_string()
        })
        .unwrap_or_default())
}
