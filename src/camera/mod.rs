//! Camera client: protocol primitives plus the tracked session state.
//!
//! Every call spawns the relay and blocks until it exits. The tracking flags
//! (`live_view_active`, `auto_focus`) are local assumptions, never read back
//! from the application; if live view is closed from the GUI the flag goes
//! stale and nothing notices. One `Camera` must not be shared across threads
//! without external locking.
//!
//! CHANGELOG:
//! - 10/17/2026 - Split actions and typed settings into submodules
//! - 10/17/2026 - Initial implementation

pub mod actions;
pub mod settings;

use std::cell::RefCell;
use std::time::Duration;

use tracing::{error, info};

use crate::config::Config;
use crate::error::{CameraError, CameraResult};
use crate::events::{CameraEvent, Callback, EventKind, EventRegistry};
use crate::launcher;
use crate::protocol::{self, Command};
use crate::relay::{ProcessRelay, Relay};

pub use actions::{LiveViewSession, RecordingStart};
pub use settings::{Setting, TransferMode};

/// Default wait between a capture and the `lastcaptured` query.
pub const DEFAULT_CAPTURE_SETTLE: Duration = Duration::from_secs(1);

/// digiCamControl remote-control client.
#[derive(Debug)]
pub struct Camera<R = ProcessRelay> {
    relay: R,
    live_view_active: bool,
    auto_focus: bool,
    capture_settle: Duration,
    events: RefCell<EventRegistry>,
}

impl Camera<ProcessRelay> {
    /// Build a client over the installed relay without touching the application.
    ///
    /// # Errors
    /// [`CameraError::MissingExecutable`] if `CameraControl.exe` is not found
    /// under the configured install directory.
    pub fn new(config: &Config) -> CameraResult<Self> {
        launcher::check_install(config)?;
        Ok(Self::with_relay(ProcessRelay::new(config.relay_path()))
            .with_auto_focus(config.auto_focus)
            .with_capture_settle(config.capture_settle()))
    }

    /// Like [`Camera::new`], and start the application first if it is not
    /// running and `config.launch` is set.
    pub fn open(config: &Config) -> CameraResult<Self> {
        let camera = Self::new(config)?;
        if config.launch && launcher::ensure_running(config)? {
            info!("digiCamControl started");
        }
        Ok(camera)
    }
}

impl<R: Relay> Camera<R> {
    pub fn with_relay(relay: R) -> Self {
        Self {
            relay,
            live_view_active: false,
            auto_focus: true,
            capture_settle: DEFAULT_CAPTURE_SETTLE,
            events: RefCell::new(EventRegistry::new()),
        }
    }

    pub fn with_auto_focus(mut self, enabled: bool) -> Self {
        self.auto_focus = enabled;
        self
    }

    pub fn with_capture_settle(mut self, settle: Duration) -> Self {
        self.capture_settle = settle;
        self
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn live_view_active(&self) -> bool {
        self.live_view_active
    }

    pub fn auto_focus(&self) -> bool {
        self.auto_focus
    }

    pub fn set_auto_focus(&mut self, enabled: bool) {
        self.auto_focus = enabled;
    }

    /// Register the callback for an event kind; the previous one is returned.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> Option<Callback>
    where
        F: FnMut(&CameraEvent) + Send + 'static,
    {
        self.events.get_mut().on(kind, callback)
    }

    pub fn off(&mut self, kind: EventKind) -> Option<Callback> {
        self.events.get_mut().off(kind)
    }

    pub(crate) fn emit(&self, event: CameraEvent) {
        self.events.borrow_mut().emit(&event);
    }

    /// Log a failure and raise `command_failed`.
    pub(crate) fn report(&self, command: &Command, err: &CameraError) {
        error!(command = %command, "Error executing command: {}", err);
        let message = err
            .protocol_message()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        self.emit(CameraEvent::CommandFailed {
            command: command.to_string(),
            message,
        });
    }

    /// Pass `result` through, reporting it if it failed.
    pub(crate) fn checked<T>(&self, command: &Command, result: CameraResult<T>) -> CameraResult<T> {
        if let Err(err) = &result {
            self.report(command, err);
        }
        result
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    /// Send a command and return the raw reply text.
    ///
    /// Relay failures are reported and returned; the reply itself is not
    /// inspected.
    pub fn execute(&self, command: &Command) -> CameraResult<String> {
        let result = self.relay.execute(command);
        if let Ok(raw) = &result {
            info!(command = %command, "Result:\n{}", raw.trim_end());
        }
        self.checked(command, result)
    }

    /// `get <param>`: the value with quotes and terminators trimmed.
    pub fn get(&self, param: &str) -> CameraResult<String> {
        let command = Command::get(param);
        let raw = self.execute(&command)?;
        self.checked(&command, protocol::parse_value(&command, &raw))
    }

    /// `set <param> <value>`: the value echoed by the application.
    ///
    /// Known read-only settings are refused with [`CameraError::ReadOnly`]
    /// before the relay runs.
    pub fn set(&self, param: &str, value: &str) -> CameraResult<String> {
        let command = Command::set(param, value);
        if let Ok(setting) = param.parse::<Setting>() {
            if !setting.is_writable() {
                return self.checked(&command, Err(CameraError::ReadOnly(setting.name())));
            }
        }
        let raw = self.execute(&command)?;
        self.checked(&command, protocol::parse_value(&command, &raw))
    }

    /// `list <param>`: the selectable values in the application's order.
    pub fn list(&self, param: &str) -> CameraResult<Vec<String>> {
        let command = Command::list(param);
        let raw = self.execute(&command)?;
        self.checked(&command, protocol::parse_list(&command, &raw))
    }

    /// `do <action> [args...]`: the (usually empty) response body.
    pub fn action(&self, name: &str, args: &[&str]) -> CameraResult<String> {
        self.run_action(&Command::action(name, args))
    }

    pub(crate) fn run_action(&self, command: &Command) -> CameraResult<String> {
        let raw = self.execute(command)?;
        self.checked(command, protocol::parse_action(command, &raw))
    }

    /// Send a free-form line such as `capture` or `get session.folder`.
    ///
    /// The first word must be `get`, `set`, `list`, `capture` or `do`; anything
    /// else is rejected without running the relay. Returns the raw reply.
    pub fn single_line_command(&self, text: &str) -> CameraResult<String> {
        let command = match Command::single_line(text) {
            Ok(command) => command,
            Err(err) => {
                error!("{}", err);
                return Err(err);
            }
        };
        self.execute(&command)
    }
}
