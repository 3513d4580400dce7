//! Typed camera and session settings.
//!
//! Each accessor is a plain `get`/`set`/`list` with the protocol name baked
//! in. Values are not validated here; the application rejects what it does
//! not accept and the rejection comes back as [`CameraError::Protocol`].
//!
//! CHANGELOG:
//! - 10/17/2026 - Typed write/list with read-only and listable checks
//! - 10/17/2026 - Initial implementation

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;
use tracing::error;

use super::Camera;
use crate::error::{CameraError, CameraResult};
use crate::relay::Relay;

/// Settings understood by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    ShutterSpeed,
    Iso,
    ExposureCompensation,
    Aperture,
    FocusMode,
    WhiteBalance,
    Mode,
    Compression,
    SessionName,
    SessionFolder,
    SessionCounter,
    FileNameTemplate,
    DeleteFileAfterTransfer,
    Transfer,
    LastCaptured,
}

impl Setting {
    pub const ALL: [Setting; 15] = [
        Setting::ShutterSpeed,
        Setting::Iso,
        Setting::ExposureCompensation,
        Setting::Aperture,
        Setting::FocusMode,
        Setting::WhiteBalance,
        Setting::Mode,
        Setting::Compression,
        Setting::SessionName,
        Setting::SessionFolder,
        Setting::SessionCounter,
        Setting::FileNameTemplate,
        Setting::DeleteFileAfterTransfer,
        Setting::Transfer,
        Setting::LastCaptured,
    ];

    /// Parameter name on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Setting::ShutterSpeed => "shutterspeed",
            Setting::Iso => "iso",
            Setting::ExposureCompensation => "exposurecompensation",
            Setting::Aperture => "aperture",
            Setting::FocusMode => "focusmode",
            Setting::WhiteBalance => "whitebalance",
            Setting::Mode => "mode",
            Setting::Compression => "compressionsetting",
            Setting::SessionName => "session.name",
            Setting::SessionFolder => "session.folder",
            Setting::SessionCounter => "session.counter",
            Setting::FileNameTemplate => "session.filenametemplate",
            Setting::DeleteFileAfterTransfer => "session.deletefileaftertransfer",
            Setting::Transfer => "transfer",
            Setting::LastCaptured => "lastcaptured",
        }
    }

    /// Whether `list <name>` returns the selectable values.
    pub fn is_listable(&self) -> bool {
        matches!(
            self,
            Setting::ShutterSpeed
                | Setting::Iso
                | Setting::ExposureCompensation
                | Setting::Aperture
                | Setting::FocusMode
                | Setting::WhiteBalance
                | Setting::Mode
                | Setting::Compression
        )
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self, Setting::LastCaptured)
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Setting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Setting::ALL
            .into_iter()
            .find(|setting| setting.name() == wanted)
            .ok_or_else(|| format!("Unknown setting: {}", s))
    }
}

/// Where captured images are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferMode {
    PcOnly,
    CameraOnly,
    Both,
}

impl TransferMode {
    pub const ALL: [TransferMode; 3] = [
        TransferMode::PcOnly,
        TransferMode::CameraOnly,
        TransferMode::Both,
    ];

    /// Value sent with `set transfer`.
    pub fn as_protocol_str(&self) -> &'static str {
        match self {
            TransferMode::PcOnly => "Save_to_PC_only",
            TransferMode::CameraOnly => "Save_to_camera_only",
            TransferMode::Both => "Save_to_PC_and_camera",
        }
    }

    fn short_name(&self) -> &'static str {
        match self {
            TransferMode::PcOnly => "pc",
            TransferMode::CameraOnly => "camera",
            TransferMode::Both => "both",
        }
    }
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_protocol_str())
    }
}

impl FromStr for TransferMode {
    type Err = String;

    /// Accepts the protocol name with spaces or underscores
    /// (`Save to PC only`, `Save_to_PC_only`), or `pc`/`camera`/`both`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(' ', "_");
        TransferMode::ALL
            .into_iter()
            .find(|mode| {
                mode.as_protocol_str().eq_ignore_ascii_case(&normalized)
                    || mode.short_name().eq_ignore_ascii_case(&normalized)
            })
            .ok_or_else(|| format!("Unknown transfer mode: {}", s))
    }
}

fn invalid(param: &str, detail: String) -> CameraError {
    CameraError::InvalidResponse {
        command: format!("get {}", param),
        detail,
    }
}

/// Accepts `True`/`False` in any case, plus `1`/`0`.
fn parse_flag(param: &str, value: &str) -> CameraResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(param, format!("expected a boolean, got {:?}", value))),
    }
}

macro_rules! listable_setting {
    ($(#[$doc:meta])* $setting:path => $getter:ident, $setter:ident, $lister:ident) => {
        $(#[$doc])*
        pub fn $getter(&self) -> CameraResult<String> {
            self.get($setting.name())
        }

        pub fn $setter(&self, value: &str) -> CameraResult<String> {
            self.set($setting.name(), value)
        }

        pub fn $lister(&self) -> CameraResult<Vec<String>> {
            self.list($setting.name())
        }
    };
}

impl<R: Relay> Camera<R> {
    // ========================================================================
    // Exposure and image settings (listable)
    // ========================================================================

    listable_setting!(
        /// Shutter speed, e.g. `1/125`.
        Setting::ShutterSpeed => shutter_speed, set_shutter_speed, shutter_speeds
    );
    listable_setting!(Setting::Iso => iso, set_iso, isos);
    listable_setting!(
        /// Exposure compensation, e.g. `+0.3`.
        Setting::ExposureCompensation =>
            exposure_compensation,
            set_exposure_compensation,
            exposure_compensations
    );
    listable_setting!(Setting::Aperture => aperture, set_aperture, apertures);
    listable_setting!(Setting::FocusMode => focus_mode, set_focus_mode, focus_modes);
    listable_setting!(Setting::WhiteBalance => white_balance, set_white_balance, white_balances);
    listable_setting!(
        /// Shooting mode (`M`, `A`, `S`, `P`, ...).
        Setting::Mode => mode, set_mode, modes
    );
    listable_setting!(Setting::Compression => compression, set_compression, compressions);

    // ========================================================================
    // Session settings
    // ========================================================================

    pub fn session_name(&self) -> CameraResult<String> {
        self.get(Setting::SessionName.name())
    }

    pub fn set_session_name(&self, name: &str) -> CameraResult<String> {
        self.set(Setting::SessionName.name(), name)
    }

    /// Folder the application saves transferred files into.
    pub fn folder(&self) -> CameraResult<PathBuf> {
        self.get(Setting::SessionFolder.name()).map(PathBuf::from)
    }

    pub fn set_folder(&self, folder: &str) -> CameraResult<String> {
        self.set(Setting::SessionFolder.name(), folder)
    }

    /// Session file counter.
    pub fn counter(&self) -> CameraResult<u32> {
        let param = Setting::SessionCounter.name();
        let value = self.get(param)?;
        value
            .trim()
            .parse()
            .map_err(|e| invalid(param, format!("counter {:?}: {}", value, e)))
    }

    pub fn set_counter(&self, counter: u32) -> CameraResult<String> {
        self.set(Setting::SessionCounter.name(), &counter.to_string())
    }

    pub fn filename_template(&self) -> CameraResult<String> {
        self.get(Setting::FileNameTemplate.name())
    }

    /// Set the file name template. Passed through verbatim.
    ///
    /// Placeholders understood by the application:
    /// - `[Counter X digit]`: session counter, zero-padded to X characters
    /// - `[Camera Counter X digit]`: camera's own counter, zero-padded
    /// - `[Session Name]`: name of the current session
    /// - `[Capture Name]`: value set in the main window's session tab
    /// - `[Series 4 digit]`: series number, bumped after every focus stack
    /// - `[File format]`: `jpg` or raw extension of the captured file
    /// - `[Barcode]`: value scanned in the barcode window
    /// - `[Camera Name]`: name from the camera property window
    /// - `[Date yyyy-MM-dd]` and friends: capture date in the given format
    ///
    /// A backslash starts a subfolder, e.g. `[Date yyyy-MM-dd]\[Counter 4 digit]`.
    pub fn set_filename_template(&self, template: &str) -> CameraResult<String> {
        self.set(Setting::FileNameTemplate.name(), template)
    }

    pub fn delete_file_after_transfer(&self) -> CameraResult<bool> {
        let param = Setting::DeleteFileAfterTransfer.name();
        parse_flag(param, &self.get(param)?)
    }

    pub fn set_delete_file_after_transfer(&self, enabled: bool) -> CameraResult<String> {
        let value = if enabled { "True" } else { "False" };
        self.set(Setting::DeleteFileAfterTransfer.name(), value)
    }

    /// Current transfer mode. The application reports it with spaces
    /// (`Save to PC only`); both spellings are accepted.
    pub fn transfer_mode(&self) -> CameraResult<TransferMode> {
        let param = Setting::Transfer.name();
        let value = self.get(param)?;
        value.parse().map_err(|e: String| invalid(param, e))
    }

    pub fn set_transfer_mode(&self, mode: TransferMode) -> CameraResult<String> {
        self.set(Setting::Transfer.name(), mode.as_protocol_str())
    }

    /// Path of the most recently captured file.
    pub fn last_captured(&self) -> CameraResult<PathBuf> {
        self.get(Setting::LastCaptured.name()).map(PathBuf::from)
    }

    /// Read any setting as text, for display.
    pub fn read_setting(&self, setting: Setting) -> CameraResult<String> {
        self.get(setting.name())
    }

    /// Write any setting from text. `lastcaptured` is refused without a
    /// relay call.
    pub fn write_setting(&self, setting: Setting, value: &str) -> CameraResult<String> {
        self.set(setting.name(), value)
    }

    /// Values accepted by a listable setting. Session settings have no list
    /// and are refused without a relay call.
    pub fn list_setting(&self, setting: Setting) -> CameraResult<Vec<String>> {
        if !setting.is_listable() {
            let err = CameraError::NotListable(setting.name());
            error!("{}", err);
            return Err(err);
        }
        self.list(setting.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::fake::FakeRelay;
    use std::time::Duration;

    fn camera(relay: FakeRelay) -> Camera<FakeRelay> {
        Camera::with_relay(relay).with_capture_settle(Duration::ZERO)
    }

    #[test]
    fn test_setting_names_parse_back() {
        for setting in Setting::ALL {
            assert_eq!(setting.name().parse::<Setting>().unwrap(), setting);
        }
        assert_eq!("ISO".parse::<Setting>().unwrap(), Setting::Iso);
        assert!("zoom".parse::<Setting>().is_err());
        assert!(!Setting::LastCaptured.is_writable());
        assert!(!Setting::SessionName.is_listable());
        assert!(Setting::Compression.is_listable());
    }

    #[test]
    fn test_write_read_only_setting_is_refused() {
        let cam = camera(FakeRelay::new());
        let err = cam
            .write_setting(Setting::LastCaptured, "C:\\x.jpg")
            .unwrap_err();
        assert!(matches!(err, CameraError::ReadOnly("lastcaptured")));
        assert!(matches!(
            cam.set("lastcaptured", "C:\\x.jpg").unwrap_err(),
            CameraError::ReadOnly(_)
        ));
        assert!(cam.relay().calls().is_empty());

        cam.write_setting(Setting::SessionName, "dusk").unwrap();
        assert_eq!(cam.relay().calls(), vec!["set session.name dusk"]);
    }

    #[test]
    fn test_list_unlisted_setting_is_refused() {
        let relay = FakeRelay::new().reply("list iso", "response:[\"100\",\"200\"];\r\n");
        let cam = camera(relay);
        assert!(matches!(
            cam.list_setting(Setting::SessionFolder).unwrap_err(),
            CameraError::NotListable("session.folder")
        ));
        assert_eq!(cam.list_setting(Setting::Iso).unwrap(), vec!["100", "200"]);
        assert_eq!(cam.relay().calls(), vec!["list iso"]);
    }

    #[test]
    fn test_transfer_mode_parsing() {
        let parse = |s: &str| s.parse::<TransferMode>();
        assert_eq!(parse("Save to PC only"), Ok(TransferMode::PcOnly));
        assert_eq!(parse("Save_to_camera_only"), Ok(TransferMode::CameraOnly));
        assert_eq!(parse("Save to PC and camera"), Ok(TransferMode::Both));
        assert_eq!(parse("both"), Ok(TransferMode::Both));
        assert!("Save to cloud".parse::<TransferMode>().is_err());
    }

    #[test]
    fn test_transfer_mode_round_trip_through_spaces() {
        let relay = FakeRelay::new().rewrite("Save_to_PC_and_camera", "Save to PC and camera");
        let cam = camera(relay);
        cam.set_transfer_mode(TransferMode::Both).unwrap();
        assert_eq!(
            cam.relay().calls(),
            vec!["set transfer Save_to_PC_and_camera"]
        );
        assert_eq!(cam.transfer_mode().unwrap(), TransferMode::Both);
    }

    #[test]
    fn test_transfer_mode_unknown_value() {
        let cam = camera(FakeRelay::new().with_value("transfer", "Save to cloud"));
        assert!(matches!(
            cam.transfer_mode().unwrap_err(),
            CameraError::InvalidResponse { .. }
        ));
    }

    #[test]
    fn test_listable_accessors_use_protocol_names() {
        let relay = FakeRelay::new()
            .with_value("shutterspeed", "1/60")
            .reply("list aperture", "response:[\"2.8\",\"4.0\",\"5.6\"];\r\n");
        let cam = camera(relay);

        assert_eq!(cam.shutter_speed().unwrap(), "1/60");
        cam.set_white_balance("Daylight").unwrap();
        assert_eq!(cam.apertures().unwrap(), vec!["2.8", "4.0", "5.6"]);
        assert!(cam.isos().is_err());
        cam.set_compression("RAW + JPEG Fine").unwrap();

        assert_eq!(
            cam.relay().calls(),
            vec![
                "get shutterspeed",
                "set whitebalance Daylight",
                "list aperture",
                "list iso",
                "set compressionsetting RAW + JPEG Fine",
            ]
        );
    }

    #[test]
    fn test_session_accessors() {
        let cam = camera(FakeRelay::new().with_value("session.counter", "0042"));
        assert_eq!(cam.counter().unwrap(), 42);
        cam.set_counter(7).unwrap();
        assert_eq!(cam.counter().unwrap(), 7);

        cam.set_folder("D:\\Shoots\\Moon").unwrap();
        assert_eq!(cam.folder().unwrap(), PathBuf::from("D:\\Shoots\\Moon"));

        cam.set_session_name("moon").unwrap();
        assert_eq!(cam.session_name().unwrap(), "moon");
    }

    #[test]
    fn test_counter_not_a_number() {
        let cam = camera(FakeRelay::new().with_value("session.counter", "n/a"));
        assert!(matches!(
            cam.counter().unwrap_err(),
            CameraError::InvalidResponse { .. }
        ));
    }

    #[test]
    fn test_filename_template_is_verbatim() {
        let cam = camera(FakeRelay::new());
        let template = "[Date yyyy-MM-dd]\\[Session Name]_[Counter 4 digit]";
        cam.set_filename_template(template).unwrap();
        assert_eq!(cam.filename_template().unwrap(), template);
        assert_eq!(
            cam.relay().calls()[0],
            format!("set session.filenametemplate {}", template)
        );
    }

    #[test]
    fn test_delete_after_transfer_flag() {
        let cam = camera(FakeRelay::new());
        cam.set_delete_file_after_transfer(true).unwrap();
        assert_eq!(
            cam.relay().value("session.deletefileaftertransfer").as_deref(),
            Some("True")
        );
        assert!(cam.delete_file_after_transfer().unwrap());
        cam.set_delete_file_after_transfer(false).unwrap();
        assert!(!cam.delete_file_after_transfer().unwrap());
    }

    #[test]
    fn test_last_captured() {
        let relay = FakeRelay::new().reply(
            "get lastcaptured",
            ":;response:\"C:\\Users\\me\\Pictures\\DSC_0012.NEF\";\r\n",
        );
        let cam = camera(relay);
        assert_eq!(
            cam.last_captured().unwrap(),
            PathBuf::from("C:\\Users\\me\\Pictures\\DSC_0012.NEF")
        );
    }
}
