//! Configuration: where digiCamControl is installed and how the client behaves.
//!
//! Loaded from a JSON file; every field is optional. Lookup order for the file:
//! 1. `--config` on the command line
//! 2. `DIGICAM_CONFIG_PATH` env var
//! 3. `<config dir>/digicam/config.json`
//!
//! A missing file means defaults. `DIGICAM_INSTALL_DIR` overrides `install_dir`.
//!
//! ```json
//! {
//!   "install_dir": "D:\\Tools\\digiCamControl",
//!   "startup_timeout_secs": 8,
//!   "capture_settle_ms": 1500,
//!   "auto_focus": false,
//!   "launch": true
//! }
//! ```
//!
//! CHANGELOG:
//! - 10/17/2026 - Initial implementation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application executable.
pub const APP_EXE: &str = "CameraControl.exe";

/// Command-line relay executable.
pub const RELAY_EXE: &str = "CameraControlRemoteCmd.exe";

/// Stock install location of digiCamControl.
pub const DEFAULT_INSTALL_DIR: &str = "C:\\Program Files (x86)\\digiCamControl";

pub const CONFIG_PATH_ENV: &str = "DIGICAM_CONFIG_PATH";
pub const INSTALL_DIR_ENV: &str = "DIGICAM_INSTALL_DIR";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding both executables (`~` is expanded).
    pub install_dir: String,
    /// Wait after launching the application before sending commands.
    pub startup_timeout_secs: u64,
    /// Wait after a capture before asking for the last captured file.
    pub capture_settle_ms: u64,
    /// Use the autofocus capture command outside live view.
    pub auto_focus: bool,
    /// Start the application if it is not running.
    pub launch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            install_dir: DEFAULT_INSTALL_DIR.to_string(),
            startup_timeout_secs: 5,
            capture_settle_ms: 1000,
            auto_focus: true,
            launch: true,
        }
    }
}

/// Default config file path.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("digicam")
        .join("config.json")
}

impl Config {
    /// Load from `path` (or the default location) and apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_config_path);
        let mut config = Self::load_file(&path)?;
        if let Ok(dir) = std::env::var(INSTALL_DIR_ENV) {
            config.install_dir = dir;
        }
        Ok(config)
    }

    /// Read one config file; a missing file yields defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Install directory with `~` and env vars expanded.
    pub fn install_dir(&self) -> PathBuf {
        let expanded = shellexpand::full(&self.install_dir)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.install_dir.clone());
        PathBuf::from(expanded)
    }

    pub fn app_path(&self) -> PathBuf {
        self.install_dir().join(APP_EXE)
    }

    pub fn relay_path(&self) -> PathBuf {
        self.install_dir().join(RELAY_EXE)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }

    pub fn capture_settle(&self) -> Duration {
        Duration::from_millis(self.capture_settle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.install_dir, DEFAULT_INSTALL_DIR);
        assert_eq!(config.startup_timeout(), Duration::from_secs(5));
        assert_eq!(config.capture_settle(), Duration::from_secs(1));
        assert!(config.auto_focus);
        assert!(config.launch);
    }

    #[test]
    fn test_executable_paths() {
        let config = Config {
            install_dir: "/opt/dcc".to_string(),
            ..Config::default()
        };
        let dir = PathBuf::from("/opt/dcc");
        assert_eq!(config.app_path(), dir.join("CameraControl.exe"));
        assert_eq!(config.relay_path(), dir.join("CameraControlRemoteCmd.exe"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_file(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"auto_focus": false, "capture_settle_ms": 250}"#).unwrap();

        let config = Config::load_file(&path).unwrap();
        assert!(!config.auto_focus);
        assert_eq!(config.capture_settle(), Duration::from_millis(250));
        assert_eq!(config.install_dir, DEFAULT_INSTALL_DIR);
        assert_eq!(config.startup_timeout_secs, 5);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_tilde_expansion() {
        let config = Config {
            install_dir: "~/dcc".to_string(),
            ..Config::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.install_dir(), home.join("dcc"));
        }
    }
}
