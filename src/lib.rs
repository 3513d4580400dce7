//! digicam library
//!
//! Remote control for digiCamControl through its command-line relay,
//! `CameraControlRemoteCmd.exe`. Exposes the camera client for use by the
//! `digicam` binary and by other programs.
//!
//! ```no_run
//! use digicam::{Camera, Config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let camera = Camera::open(&Config::load(None)?)?;
//! camera.set_iso("400")?;
//! let path = camera.capture(None)?;
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial library structure

// Core modules
pub mod camera;
pub mod config;
pub mod error;
pub mod events;
pub mod launcher;
pub mod protocol;
pub mod relay;

// CLI support
pub mod commands;
pub mod output;

pub use camera::{Camera, LiveViewSession, RecordingStart, Setting, TransferMode};
pub use config::Config;
pub use error::{CameraError, CameraResult};
pub use events::{CameraEvent, EventKind};
pub use protocol::Command;
pub use relay::{ProcessRelay, Relay};
