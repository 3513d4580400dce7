//! Action commands: live view, focus, capture, recording, window control.
//!
//! CHANGELOG:
//! - 10/17/2026 - Added `LiveViewSession` guard
//! - 10/17/2026 - Initial implementation

use std::ops::{Deref, DerefMut};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{error, info};

use super::Camera;
use crate::error::{CameraError, CameraResult};
use crate::events::CameraEvent;
use crate::protocol::{self, Command};
use crate::relay::Relay;

pub const LIVE_VIEW_SHOW: &str = "LiveViewWnd_Show";
pub const LIVE_VIEW_HIDE: &str = "LiveViewWnd_Hide";
pub const LIVE_VIEW_FOCUS: &str = "LiveView_Focus";
pub const LIVE_VIEW_CAPTURE: &str = "LiveView_Capture";
pub const LIVE_VIEW_START_RECORD: &str = "LiveViewWnd_StartRecord";
pub const LIVE_VIEW_STOP_RECORD: &str = "LiveViewWnd_StopRecord";
pub const START_RECORD: &str = "StartRecord";
pub const STOP_RECORD: &str = "StopRecord";
pub const CAPTURE: &str = "Capture";
pub const CAPTURE_NO_AF: &str = "CaptureNoAf";
pub const MINIMIZE_ALL: &str = "All_Minimize";
pub const CLOSE_ALL: &str = "All_Close";

/// Result of asking the camera to start recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum RecordingStart {
    Started,
    /// The camera answered with text instead of an empty body.
    Refused(String),
}

impl RecordingStart {
    pub fn is_started(&self) -> bool {
        matches!(self, RecordingStart::Started)
    }
}

impl<R: Relay> Camera<R> {
    /// Show the live view window, then minimize all windows.
    ///
    /// The flag is set before the commands are sent and is not guarded
    /// against repeated calls.
    pub fn start_live_view(&mut self) -> CameraResult<()> {
        self.live_view_active = true;
        self.action(LIVE_VIEW_SHOW, &[])?;
        self.minimize_all()?;
        self.emit(CameraEvent::LiveViewStarted);
        Ok(())
    }

    pub fn stop_live_view(&mut self) -> CameraResult<()> {
        self.live_view_active = false;
        self.action(LIVE_VIEW_HIDE, &[])?;
        self.emit(CameraEvent::LiveViewStopped);
        Ok(())
    }

    /// Start live view and stop it again when the returned guard drops.
    ///
    /// If starting fails the guard has already been dropped, so live view is
    /// hidden again before the error is returned.
    pub fn live_view(&mut self) -> CameraResult<LiveViewSession<'_, R>> {
        let session = LiveViewSession {
            camera: self,
            finished: false,
        };
        session.camera.start_live_view()?;
        Ok(session)
    }

    /// Run `f` inside a live view session; live view is stopped afterwards
    /// whether `f` succeeds, fails or panics.
    pub fn with_live_view<T, F>(&mut self, f: F) -> CameraResult<T>
    where
        F: FnOnce(&mut Camera<R>) -> CameraResult<T>,
    {
        let mut session = self.live_view()?;
        let result = f(&mut *session);
        let stopped = session.finish();
        let value = result?;
        stopped?;
        Ok(value)
    }

    /// Autofocus through the live view window.
    ///
    /// Only valid in live view; otherwise nothing is sent and
    /// [`CameraError::NotInLiveView`] is returned.
    pub fn focus(&self) -> CameraResult<()> {
        if !self.live_view_active {
            let err = CameraError::NotInLiveView(LIVE_VIEW_FOCUS);
            error!("{}", err);
            return Err(err);
        }
        self.action(LIVE_VIEW_FOCUS, &[])?;
        Ok(())
    }

    /// The command `capture` would send right now.
    pub fn capture_command(&self, location: Option<&str>) -> Command {
        let location = location.unwrap_or("");
        if self.live_view_active {
            Command::action(LIVE_VIEW_CAPTURE, &[location])
        } else if self.auto_focus {
            Command::bare(CAPTURE, &[location])
        } else {
            Command::bare(CAPTURE_NO_AF, &[location])
        }
    }

    /// Take a picture and return the path of the file it produced.
    ///
    /// Live view picks the live view capture; otherwise the autofocus flag
    /// picks `Capture` or `CaptureNoAf`. `location` is appended verbatim.
    /// After a successful capture the client waits the configured settle
    /// time so the application can finish writing, then asks for
    /// `lastcaptured`.
    pub fn capture(&self, location: Option<&str>) -> CameraResult<PathBuf> {
        let command = self.capture_command(location);
        self.run_action(&command)?;

        std::thread::sleep(self.capture_settle);
        let path = self.last_captured()?;
        info!("Captured {}", path.display());
        self.emit(CameraEvent::Captured { path: path.clone() });
        Ok(path)
    }

    /// Start video recording.
    ///
    /// Success is signalled by an empty response body; any text in the body
    /// is the camera's reason for refusing. Unlike other actions the
    /// `response:` marker is required, since output without it says nothing
    /// about whether recording started.
    pub fn start_recording(&self) -> CameraResult<RecordingStart> {
        let name = if self.live_view_active {
            LIVE_VIEW_START_RECORD
        } else {
            START_RECORD
        };
        let command = Command::action::<&str>(name, &[]);
        let raw = self.execute(&command)?;
        let body = self.checked(&command, protocol::parse_value(&command, &raw))?;

        if body.is_empty() {
            self.emit(CameraEvent::RecordingStarted);
            Ok(RecordingStart::Started)
        } else {
            error!("Error starting video recording: {}", body);
            Ok(RecordingStart::Refused(body))
        }
    }

    /// Stop video recording. The response body is ignored.
    pub fn stop_recording(&self) -> CameraResult<()> {
        let name = if self.live_view_active {
            LIVE_VIEW_STOP_RECORD
        } else {
            STOP_RECORD
        };
        self.execute(&Command::action::<&str>(name, &[]))?;
        self.emit(CameraEvent::RecordingStopped);
        Ok(())
    }

    pub fn minimize_all(&self) -> CameraResult<()> {
        self.action(MINIMIZE_ALL, &[])?;
        Ok(())
    }

    /// Close all windows and quit digiCamControl.
    pub fn close_all(&self) -> CameraResult<()> {
        self.action(CLOSE_ALL, &[])?;
        Ok(())
    }
}

/// Live view kept open for the guard's lifetime.
///
/// Derefs to the camera, so settings and captures can be issued through it.
pub struct LiveViewSession<'a, R: Relay> {
    camera: &'a mut Camera<R>,
    finished: bool,
}

impl<R: Relay> LiveViewSession<'_, R> {
    /// Stop live view now and report whether that worked.
    pub fn finish(mut self) -> CameraResult<()> {
        self.finished = true;
        self.camera.stop_live_view()
    }
}

impl<R: Relay> Deref for LiveViewSession<'_, R> {
    type Target = Camera<R>;

    fn deref(&self) -> &Self::Target {
        self.camera
    }
}

impl<R: Relay> DerefMut for LiveViewSession<'_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.camera
    }
}

impl<R: Relay> Drop for LiveViewSession<'_, R> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Err(e) = self.camera.stop_live_view() {
            error!("Failed to stop live view: {}", e);
        }
    }
}
