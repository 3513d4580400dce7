//! Output formatting and control utilities.
//!
//! CHANGELOG:
//! - 10/17/2026 - Added `fail` for JSON-mode errors
//! - 10/17/2026 - Initial implementation

use serde::Serialize;
use serde_json::{json, Value};

/// Output control settings from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct OutputControls {
    pub json: bool,
    pub compact: bool,
}

impl OutputControls {
    /// Render data as JSON, pretty unless `compact` is set.
    pub fn emit<T: Serialize>(&self, data: &T) -> String {
        let value = serde_json::to_value(data).unwrap_or(Value::Null);
        if self.compact {
            serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Print data to stdout according to output controls.
    pub fn print<T: Serialize>(&self, data: &T) {
        println!("{}", self.emit(data));
    }

    /// Report a failed command: a JSON error object on stdout in JSON mode,
    /// `Error: ...` on stderr otherwise.
    pub fn fail(&self, error: &str) {
        if self.json {
            println!("{}", format_error(error));
        } else {
            eprintln!("Error: {}", error);
        }
    }
}

/// Format error as JSON.
pub fn format_error(error: &str) -> String {
    serde_json::to_string(&json!({
        "error": error,
        "success": false
    }))
    .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Reading {
        setting: &'static str,
        value: &'static str,
    }

    #[test]
    fn test_emit_compact() {
        let output = OutputControls {
            json: true,
            compact: true,
        };
        let text = output.emit(&Reading {
            setting: "iso",
            value: "400",
        });
        assert_eq!(text, r#"{"setting":"iso","value":"400"}"#);
    }

    #[test]
    fn test_emit_pretty() {
        let output = OutputControls {
            json: true,
            compact: false,
        };
        let text = output.emit(&vec!["1/60", "1/125"]);
        assert!(text.contains('\n'));
        let parsed: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec!["1/60", "1/125"]);
    }

    #[test]
    fn test_format_error() {
        let value: Value = serde_json::from_str(&format_error("No such property")).unwrap();
        assert_eq!(value["error"], "No such property");
        assert_eq!(value["success"], false);
    }
}
