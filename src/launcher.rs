//! Locating and starting the digiCamControl application.
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use std::path::Path;
use std::process::Command as ProcessCommand;
use std::time::Duration;

use tracing::{error, info};

use crate::config::{Config, APP_EXE};
use crate::error::{CameraError, CameraResult};

/// Fail unless the main executable exists under the install directory.
pub fn check_install(config: &Config) -> CameraResult<()> {
    let app_path = config.app_path();
    if !app_path.exists() {
        error!("Invalid CameraControl application path: {}", app_path.display());
        return Err(CameraError::MissingExecutable(app_path));
    }
    Ok(())
}

/// True if `process_name` appears in a `tasklist` listing.
pub fn listing_contains(listing: &str, process_name: &str) -> bool {
    let needle = process_name.to_lowercase();
    listing
        .lines()
        .any(|line| line.to_lowercase().contains(&needle))
}

/// Check whether a process is running via `tasklist`.
///
/// Failure to run `tasklist` is logged and reported as "not running".
pub fn is_running(process_name: &str) -> bool {
    match ProcessCommand::new("tasklist").output() {
        Ok(output) if output.status.success() => {
            listing_contains(&String::from_utf8_lossy(&output.stdout), process_name)
        }
        Ok(output) => {
            error!("Error checking running tasks: tasklist exited with {}", output.status);
            false
        }
        Err(e) => {
            error!("Error checking running tasks: {}", e);
            false
        }
    }
}

/// Start the application detached and wait `settle` for it to come up.
///
/// This is a fixed wait, not a readiness check.
pub fn start_app(app_path: &Path, settle: Duration) -> CameraResult<()> {
    info!("Starting {}", app_path.display());
    ProcessCommand::new(app_path).spawn().map_err(|e| {
        error!("Error starting CameraControl application: {}", e);
        CameraError::Launch(e)
    })?;
    std::thread::sleep(settle);
    Ok(())
}

/// Start the application unless it is already running.
///
/// Returns `true` if it was started by this call.
pub fn ensure_running(config: &Config) -> CameraResult<bool> {
    if is_running(APP_EXE) {
        return Ok(false);
    }
    start_app(&config.app_path(), config.startup_timeout())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
Image Name                     PID Session Name        Session#    Mem Usage
========================= ======== ================ =========== ============
System Idle Process              0 Services                   0          8 K
CameraControl.exe             4312 Console                    1    182,440 K
explorer.exe                  2210 Console                    1     95,112 K
";

    #[test]
    fn test_listing_contains() {
        assert!(listing_contains(LISTING, "CameraControl.exe"));
        assert!(listing_contains(LISTING, "cameracontrol.exe"));
        assert!(!listing_contains(LISTING, "CameraControlRemoteCmd.exe"));
        assert!(!listing_contains("", "CameraControl.exe"));
    }

    #[test]
    fn test_check_install_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            install_dir: dir.path().to_string_lossy().into_owned(),
            ..Config::default()
        };
        match check_install(&config).unwrap_err() {
            CameraError::MissingExecutable(path) => assert!(path.ends_with(APP_EXE)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_install_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(APP_EXE), b"").unwrap();
        let config = Config {
            install_dir: dir.path().to_string_lossy().into_owned(),
            ..Config::default()
        };
        assert!(check_install(&config).is_ok());
    }

    #[test]
    fn test_start_app_missing_binary() {
        let err = start_app(Path::new("/nonexistent/CameraControl.exe"), Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, CameraError::Launch(_)));
    }
}
