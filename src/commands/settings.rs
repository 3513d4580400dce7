//! Setting commands: get, set, list, raw, transfer, last-captured, status.
//!
//! CHANGELOG:
//! - 10/17/2026 - Added status snapshot
//! - 10/17/2026 - Initial implementation

use anyhow::Result;
use serde::Serialize;

use crate::camera::{Camera, Setting, TransferMode};
use crate::error::CameraResult;
use crate::output::OutputControls;
use crate::relay::Relay;

#[derive(Debug, Serialize)]
pub struct Reading {
    pub setting: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct Choices {
    pub setting: String,
    pub values: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RawReply {
    pub command: String,
    pub response: String,
}

/// One line of `status`. Exactly one of `value`/`error` is set.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatusEntry {
    pub setting: Setting,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn print_reading(reading: &Reading, output: &OutputControls) {
    if output.json {
        output.print(reading);
    } else {
        println!("{}: {}", reading.setting, reading.value);
    }
}

/// Read one setting.
pub fn get<R: Relay>(camera: &Camera<R>, setting: Setting, output: &OutputControls) -> Result<()> {
    let value = camera.read_setting(setting)?;
    print_reading(
        &Reading {
            setting: setting.name().to_string(),
            value,
        },
        output,
    );
    Ok(())
}

/// Write one setting and show the value the application reports back.
pub fn set<R: Relay>(
    camera: &Camera<R>,
    setting: Setting,
    value: &[String],
    output: &OutputControls,
) -> Result<()> {
    let value = camera.write_setting(setting, &value.join(" "))?;
    print_reading(
        &Reading {
            setting: setting.name().to_string(),
            value,
        },
        output,
    );
    Ok(())
}

/// Show the values a listable setting accepts.
pub fn list<R: Relay>(camera: &Camera<R>, setting: Setting, output: &OutputControls) -> Result<()> {
    let values = camera.list_setting(setting)?;
    let param = setting.name();
    if output.json {
        output.print(&Choices {
            setting: param.to_string(),
            values,
        });
    } else if values.is_empty() {
        println!("No values available for '{}'.", param);
    } else {
        println!("{} ({} values):", param, values.len());
        println!("{}", "-".repeat(40));
        for value in &values {
            println!("  {}", value);
        }
    }
    Ok(())
}

/// Pass a command line through unchanged and print the raw reply.
pub fn raw<R: Relay>(camera: &Camera<R>, line: &[String], output: &OutputControls) -> Result<()> {
    let line = line.join(" ");
    let response = camera.single_line_command(&line)?;
    if output.json {
        output.print(&RawReply {
            command: line,
            response,
        });
    } else {
        print!("{}", response);
    }
    Ok(())
}

/// Show the transfer mode, or change it when `mode` is given.
pub fn transfer<R: Relay>(
    camera: &Camera<R>,
    mode: Option<TransferMode>,
    output: &OutputControls,
) -> Result<()> {
    let value = match mode {
        Some(mode) => camera.set_transfer_mode(mode)?,
        None => camera.transfer_mode()?.as_protocol_str().to_string(),
    };
    print_reading(
        &Reading {
            setting: Setting::Transfer.name().to_string(),
            value,
        },
        output,
    );
    Ok(())
}

pub fn last_captured<R: Relay>(camera: &Camera<R>, output: &OutputControls) -> Result<()> {
    let path = camera.last_captured()?;
    print_reading(
        &Reading {
            setting: Setting::LastCaptured.name().to_string(),
            value: path.display().to_string(),
        },
        output,
    );
    Ok(())
}

/// Read every known setting. A failed read is recorded in its entry and
/// does not stop the others; only a relay failure aborts the snapshot.
pub fn snapshot<R: Relay>(camera: &Camera<R>) -> CameraResult<Vec<StatusEntry>> {
    let mut entries = Vec::with_capacity(Setting::ALL.len());
    for setting in Setting::ALL {
        let (value, error) = match camera.read_setting(setting) {
            Ok(value) => (Some(value), None),
            Err(e) if e.is_relay_failure() => return Err(e),
            Err(e) => {
                let reason = e
                    .protocol_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string());
                (None, Some(reason))
            }
        };
        entries.push(StatusEntry {
            setting,
            name: setting.name(),
            value,
            error,
        });
    }
    Ok(entries)
}

pub fn status<R: Relay>(camera: &Camera<R>, output: &OutputControls) -> Result<()> {
    let entries = snapshot(camera)?;
    if output.json {
        output.print(&entries);
        return Ok(());
    }

    println!("Camera status:");
    println!("{}", "-".repeat(60));
    for entry in &entries {
        match (&entry.value, &entry.error) {
            (Some(value), _) => println!("{:<34} {}", entry.name, value),
            (None, Some(error)) => println!("{:<34} ({})", entry.name, error),
            (None, None) => println!("{:<34}", entry.name),
        }
    }
    Ok(())
}
