//! Shooting commands: do, capture, record, close.
//!
//! CHANGELOG:
//! - 10/17/2026 - Live view option for capture and record
//! - 10/17/2026 - Initial implementation

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::info;

use crate::camera::{Camera, RecordingStart};
use crate::error::CameraResult;
use crate::output::OutputControls;
use crate::relay::Relay;

#[derive(Debug, Serialize)]
pub struct ActionReply {
    pub action: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct Captured {
    pub path: PathBuf,
    pub live_view: bool,
}

#[derive(Debug, Serialize)]
pub struct Recorded {
    pub seconds: u64,
    pub live_view: bool,
}

/// Run a `do` action and print its response body.
pub fn action<R: Relay>(
    camera: &Camera<R>,
    name: &str,
    args: &[String],
    output: &OutputControls,
) -> Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let response = camera.action(name, &args)?;
    if output.json {
        output.print(&ActionReply {
            action: name.to_string(),
            response,
        });
    } else if !response.is_empty() {
        println!("{}", response);
    }
    Ok(())
}

/// Take a picture. With `live_view`, focus and shoot inside a live view
/// session that is closed again afterwards.
pub fn capture<R: Relay>(
    camera: &mut Camera<R>,
    location: Option<&str>,
    live_view: bool,
    output: &OutputControls,
) -> Result<()> {
    let path = if live_view {
        camera.with_live_view(|camera| {
            camera.focus()?;
            camera.capture(location)
        })?
    } else {
        camera.capture(location)?
    };

    if output.json {
        output.print(&Captured { path, live_view });
    } else {
        println!("{}", path.display());
    }
    Ok(())
}

/// Start recording, wait, then stop.
pub fn record<R: Relay>(
    camera: &mut Camera<R>,
    seconds: u64,
    live_view: bool,
    output: &OutputControls,
) -> Result<()> {
    let outcome = if live_view {
        camera.with_live_view(|camera| record_for(camera, seconds))?
    } else {
        record_for(camera, seconds)?
    };

    if let RecordingStart::Refused(reason) = outcome {
        bail!("Recording refused: {}", reason);
    }

    if output.json {
        output.print(&Recorded { seconds, live_view });
    } else {
        println!("Recorded {} seconds.", seconds);
    }
    Ok(())
}

fn record_for<R: Relay>(camera: &Camera<R>, seconds: u64) -> CameraResult<RecordingStart> {
    let outcome = camera.start_recording()?;
    if outcome.is_started() {
        info!("Recording for {} seconds", seconds);
        thread::sleep(Duration::from_secs(seconds));
        camera.stop_recording()?;
    }
    Ok(outcome)
}

/// Close every window and quit the application.
pub fn close<R: Relay>(camera: &Camera<R>, output: &OutputControls) -> Result<()> {
    camera.close_all()?;
    if output.json {
        output.print(&serde_json::json!({ "success": true }));
    } else {
        println!("digiCamControl closed.");
    }
    Ok(())
}
