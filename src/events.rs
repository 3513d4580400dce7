//! Callback registry for client-side camera events.
//!
//! The relay has no push channel, so events are raised by the client itself
//! at the points where it changes state or sees a failure. One callback per
//! event kind; registering again replaces the previous one.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Event kinds a callback can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    LiveViewStarted,
    LiveViewStopped,
    Captured,
    RecordingStarted,
    RecordingStopped,
    CommandFailed,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::LiveViewStarted => "live_view_started",
            EventKind::LiveViewStopped => "live_view_stopped",
            EventKind::Captured => "captured",
            EventKind::RecordingStarted => "recording_started",
            EventKind::RecordingStopped => "recording_stopped",
            EventKind::CommandFailed => "command_failed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event raised by [`Camera`](crate::camera::Camera).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    LiveViewStarted,
    LiveViewStopped,
    Captured { path: PathBuf },
    RecordingStarted,
    RecordingStopped,
    CommandFailed { command: String, message: String },
}

impl CameraEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            CameraEvent::LiveViewStarted => EventKind::LiveViewStarted,
            CameraEvent::LiveViewStopped => EventKind::LiveViewStopped,
            CameraEvent::Captured { .. } => EventKind::Captured,
            CameraEvent::RecordingStarted => EventKind::RecordingStarted,
            CameraEvent::RecordingStopped => EventKind::RecordingStopped,
            CameraEvent::CommandFailed { .. } => EventKind::CommandFailed,
        }
    }
}

pub type Callback = Box<dyn FnMut(&CameraEvent) + Send>;

/// Event kind → single callback.
#[derive(Default)]
pub struct EventRegistry {
    handlers: HashMap<EventKind, Callback>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `kind`, returning the callback it replaced.
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> Option<Callback>
    where
        F: FnMut(&CameraEvent) + Send + 'static,
    {
        self.handlers.insert(kind, Box::new(callback))
    }

    pub fn off(&mut self, kind: EventKind) -> Option<Callback> {
        self.handlers.remove(&kind)
    }

    /// Invoke the callback registered for the event's kind, if any.
    pub fn emit(&mut self, event: &CameraEvent) {
        if let Some(callback) = self.handlers.get_mut(&event.kind()) {
            callback(event);
        }
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.handlers.keys().map(EventKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("EventRegistry")
            .field("handlers", &kinds)
            .finish()
    }
}
