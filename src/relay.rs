//! Process relay: runs `CameraControlRemoteCmd.exe /c "<command>"`.
//!
//! Every call is a fresh child process; nothing is kept open between commands.
//!
//! CHANGELOG:
//! - 10/17/2026 - Added the `Relay` trait so tests can swap in a fake
//! - 10/17/2026 - Initial implementation

use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

use crate::error::{CameraError, CameraResult};
use crate::protocol::Command;

/// Switch that tells the relay to forward the following command line.
pub const COMMAND_SWITCH: &str = "/c";

/// Something that can deliver a command line and return the raw reply text.
pub trait Relay {
    fn execute(&self, command: &Command) -> CameraResult<String>;
}

impl<R: Relay + ?Sized> Relay for &R {
    fn execute(&self, command: &Command) -> CameraResult<String> {
        (**self).execute(command)
    }
}

impl<R: Relay + ?Sized> Relay for Box<R> {
    fn execute(&self, command: &Command) -> CameraResult<String> {
        (**self).execute(command)
    }
}

/// Relay backed by the real command-line executable.
#[derive(Debug, Clone)]
pub struct ProcessRelay {
    path: PathBuf,
}

impl ProcessRelay {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Relay for ProcessRelay {
    /// Run the relay and capture stdout.
    ///
    /// The command line is passed as a single argument so multi-word values
    /// survive intact. Stdout is decoded lossily; the relay is not guaranteed
    /// to emit UTF-8.
    ///
    /// # Errors
    /// * [`CameraError::RelaySpawn`] if the executable cannot be started
    /// * [`CameraError::RelayFailed`] if it exits unsuccessfully
    fn execute(&self, command: &Command) -> CameraResult<String> {
        let output = ProcessCommand::new(&self.path)
            .arg(COMMAND_SWITCH)
            .arg(command.as_str())
            .output()
            .map_err(|source| CameraError::RelaySpawn {
                command: command.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(CameraError::RelayFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

/// In-memory relay that emulates the application for unit tests.
///
/// `get`/`set` are backed by a parameter map, `list` and any other command
/// can be scripted with an exact reply, and every command line is recorded.
#[cfg(test)]
pub(crate) mod fake {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::Relay;
    use crate::error::{CameraError, CameraResult};
    use crate::protocol::Command;

    pub(crate) const NO_SUCH_PROPERTY: &str = ":;response:error;message:No such property\r\n";

    #[derive(Debug, Default)]
    pub(crate) struct FakeRelay {
        calls: RefCell<Vec<String>>,
        values: RefCell<HashMap<String, String>>,
        scripted: RefCell<HashMap<String, String>>,
        /// Value reported back instead of the stored one (e.g. `Save to PC only`).
        rewrites: RefCell<HashMap<String, String>>,
        failing: Cell<bool>,
    }

    impl FakeRelay {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_value(self, param: &str, value: &str) -> Self {
            self.values
                .borrow_mut()
                .insert(param.to_string(), value.to_string());
            self
        }

        pub(crate) fn reply(self, command: &str, raw: &str) -> Self {
            self.scripted
                .borrow_mut()
                .insert(command.to_string(), raw.to_string());
            self
        }

        pub(crate) fn rewrite(self, stored: &str, reported: &str) -> Self {
            self.rewrites
                .borrow_mut()
                .insert(stored.to_string(), reported.to_string());
            self
        }

        pub(crate) fn fail_all(&self) {
            self.failing.set(true);
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        pub(crate) fn value(&self, param: &str) -> Option<String> {
            self.values.borrow().get(param).cloned()
        }

        fn report(&self, value: &str) -> String {
            let shown = self
                .rewrites
                .borrow()
                .get(value)
                .cloned()
                .unwrap_or_else(|| value.to_string());
            format!(":;response:\"{}\";\r\n", shown)
        }
    }

    impl Relay for FakeRelay {
        fn execute(&self, command: &Command) -> CameraResult<String> {
            let text = command.as_str().to_string();
            self.calls.borrow_mut().push(text.clone());

            if self.failing.get() {
                return Err(CameraError::RelayFailed {
                    command: text,
                    status: "exit status: 1".to_string(),
                    stderr: "relay unavailable".to_string(),
                });
            }
            if let Some(raw) = self.scripted.borrow().get(&text) {
                return Ok(raw.clone());
            }

            let mut words = text.splitn(3, ' ');
            let verb = words.next().unwrap_or("");
            let param = words.next().unwrap_or("");
            let rest = words.next().unwrap_or("");
            let raw = match verb {
                "get" => match self.values.borrow().get(param) {
                    Some(value) => self.report(value),
                    None => NO_SUCH_PROPERTY.to_string(),
                },
                "set" => {
                    self.values
                        .borrow_mut()
                        .insert(param.to_string(), rest.to_string());
                    self.report(rest)
                }
                "list" => NO_SUCH_PROPERTY.to_string(),
                _ => ":;response:;\r\n".to_string(),
            };
            Ok(raw)
        }
    }
}
