//! Error type shared by the relay client, the typed accessors and the launcher.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when talking to digiCamControl.
#[derive(Error, Debug)]
pub enum CameraError {
    /// The main executable does not exist under the install directory.
    #[error("digiCamControl executable not found: {}", .0.display())]
    MissingExecutable(PathBuf),

    /// The camera-control application could not be started.
    #[error("Failed to start digiCamControl: {0}")]
    Launch(#[source] std::io::Error),

    /// The relay process could not be spawned.
    #[error("Failed to run relay for `{command}`: {source}")]
    RelaySpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The relay process ran but exited unsuccessfully.
    #[error("Relay exited with {status} for `{command}`: {stderr}")]
    RelayFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The application answered with an error message.
    #[error("`{command}` failed: {message}")]
    Protocol { command: String, message: String },

    /// The response text could not be interpreted.
    #[error("Invalid response to `{command}`: {detail}")]
    InvalidResponse { command: String, detail: String },

    /// Focus was requested while live view is not active.
    #[error("Camera is not in live view mode; cannot run `{0}`")]
    NotInLiveView(&'static str),

    /// A write was attempted on a read-only setting.
    #[error("Setting `{0}` is read-only")]
    ReadOnly(&'static str),

    /// A value list was requested for a setting that has none.
    #[error("Setting `{0}` has no list of values")]
    NotListable(&'static str),

    /// A raw single-line command used an unknown verb.
    #[error("Invalid command type `{verb}` (expected one of: {expected})")]
    InvalidCommand { verb: String, expected: String },
}

impl CameraError {
    /// True when the relay itself failed, as opposed to the application
    /// rejecting the command.
    pub fn is_relay_failure(&self) -> bool {
        matches!(
            self,
            CameraError::RelaySpawn { .. } | CameraError::RelayFailed { .. }
        )
    }

    /// The application's own error message, if this is a protocol error.
    pub fn protocol_message(&self) -> Option<&str> {
        match self {
            CameraError::Protocol { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Result type for camera operations.
pub type CameraResult<T> = Result<T, CameraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_message() {
        let err = CameraError::Protocol {
            command: "get iso".to_string(),
            message: "No such property".to_string(),
        };
        assert_eq!(err.protocol_message(), Some("No such property"));
        assert!(!err.is_relay_failure());
        assert_eq!(err.to_string(), "`get iso` failed: No such property");
    }

    #[test]
    fn test_relay_failure_kinds() {
        let err = CameraError::RelayFailed {
            command: "do Capture".to_string(),
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert!(err.is_relay_failure());
        assert_eq!(err.protocol_message(), None);
    }
}
